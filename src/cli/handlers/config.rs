use std::error::Error;

use crate::cli::commands::{ConfigAction, ConfigCmd};
use crate::io::config_io;

use super::Context;

pub(super) fn cmd_config(ctx: &Context, args: ConfigCmd) -> Result<(), Box<dyn Error>> {
    match args.action {
        ConfigAction::Show => {
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(&ctx.config)?);
            } else {
                print!("{}", toml::to_string_pretty(&ctx.config)?);
            }
            Ok(())
        }
        ConfigAction::Set(set) => {
            config_io::set_value(&ctx.config_path, &set.key, &set.value)?;
            ctx.outcome(&format!("{} = {}", set.key, set.value))
        }
        ConfigAction::Path => {
            println!("{}", ctx.config_path.display());
            Ok(())
        }
    }
}
