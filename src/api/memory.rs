use std::sync::{Mutex, MutexGuard};

use super::{ApiError, ContentApi};
use crate::model::{
    Credentials, ImageUpload, ImpactDraft, NewSection, Project, ProjectDraft, ProjectImpact,
    ProjectResearch, ResearchDraft, Section, Session, User,
};

/// In-process [`ContentApi`] holding everything in memory.
///
/// Behaves like the real server for the operations the front ends use:
/// ids are assigned on create, writes require the bearer token of an admin
/// session (401 without a token, 403 for non-admins), unknown ids give 404,
/// and deleting a section removes its projects. Every call is recorded so
/// tests can assert which remote operations ran.
#[derive(Debug, Default)]
pub struct MemoryApi {
    store: Mutex<Store>,
}

#[derive(Debug, Default)]
struct Store {
    sections: Vec<Section>,
    projects: Vec<Project>,
    impacts: Vec<ProjectImpact>,
    research: Vec<ProjectResearch>,
    accounts: Vec<Account>,
    next_id: i64,
    calls: Vec<&'static str>,
}

#[derive(Debug)]
struct Account {
    email: String,
    password: String,
    session: Session,
}

impl MemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account that `login` accepts. Returns the session the
    /// account will receive.
    pub fn add_account(&self, email: &str, password: &str, role: &str) -> Session {
        let mut store = self.lock();
        let id = store.next_id();
        let session = Session {
            token: format!("token-{}", id),
            user: User {
                id: id.to_string(),
                email: email.to_string(),
                role: role.to_string(),
            },
        };
        store.accounts.push(Account {
            email: email.to_string(),
            password: password.to_string(),
            session: session.clone(),
        });
        session
    }

    /// Names of the operations invoked so far, in call order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self, op: &str) -> usize {
        self.lock().calls.iter().filter(|c| **c == op).count()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        // A poisoned store only means another test thread panicked mid-call.
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record the call and, for writes, check the token.
    fn begin(&self, op: &'static str, token: Option<Option<&str>>) -> Result<MutexGuard<'_, Store>, ApiError> {
        let mut store = self.lock();
        store.calls.push(op);
        if let Some(token) = token {
            store.authorize(token)?;
        }
        Ok(store)
    }
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn authorize(&self, token: Option<&str>) -> Result<(), ApiError> {
        let token = token.ok_or_else(|| status(401, "token requerido"))?;
        let account = self
            .accounts
            .iter()
            .find(|a| a.session.token == token)
            .ok_or_else(|| status(401, "token inválido"))?;
        if !account.session.is_admin() {
            return Err(status(403, "acceso denegado"));
        }
        Ok(())
    }

    fn project_index(&self, id: &str) -> Result<usize, ApiError> {
        self.projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| status(404, "proyecto no encontrado"))
    }

    fn require_project(&self, project_id: i64) -> Result<(), ApiError> {
        self.project_index(&project_id.to_string()).map(|_| ())
    }

    fn require_section(&self, section_id: &str) -> Result<(), ApiError> {
        if self.sections.iter().any(|s| s.id == section_id) {
            Ok(())
        } else {
            Err(status(400, "sección inexistente"))
        }
    }
}

fn status(code: u16, message: &str) -> ApiError {
    ApiError::Status {
        status: code,
        body: serde_json::json!({ "message": message }).to_string(),
    }
}

fn upload_path(image: Option<&ImageUpload>) -> Option<String> {
    image.map(|img| format!("/uploads/{}", img.file_name))
}

impl ContentApi for MemoryApi {
    fn login(&self, credentials: &Credentials) -> Result<Session, ApiError> {
        let store = self.begin("login", None)?;
        store
            .accounts
            .iter()
            .find(|a| a.email == credentials.email && a.password == credentials.password)
            .map(|a| a.session.clone())
            .ok_or_else(|| status(401, "credenciales inválidas"))
    }

    fn get_sections(&self) -> Result<Vec<Section>, ApiError> {
        let store = self.begin("get_sections", None)?;
        Ok(store.sections.clone())
    }

    fn create_section(&self, data: &NewSection, token: Option<&str>) -> Result<(), ApiError> {
        let mut store = self.begin("create_section", Some(token))?;
        let id = store.next_id();
        store.sections.push(Section {
            id: id.to_string(),
            name: data.name.clone(),
            image: data.image.clone(),
            ods_id: Some(data.ods_id),
        });
        Ok(())
    }

    fn delete_section(&self, id: &str, token: Option<&str>) -> Result<(), ApiError> {
        let mut store = self.begin("delete_section", Some(token))?;
        let idx = store
            .sections
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| status(404, "sección no encontrada"))?;
        store.sections.remove(idx);
        store.projects.retain(|p| p.section_id != id);
        Ok(())
    }

    fn get_projects(&self) -> Result<Vec<Project>, ApiError> {
        let store = self.begin("get_projects", None)?;
        Ok(store.projects.clone())
    }

    fn create_project(
        &self,
        data: &ProjectDraft,
        image: Option<&ImageUpload>,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        let mut store = self.begin("create_project", Some(token))?;
        store.require_section(&data.section_id)?;
        let id = store.next_id();
        store.projects.push(Project {
            id: id.to_string(),
            title: data.title.clone(),
            section_id: data.section_id.clone(),
            category: data.category.clone(),
            image: upload_path(image).unwrap_or_default(),
            description: Some(data.description.clone()),
        });
        Ok(())
    }

    fn update_project(
        &self,
        id: &str,
        data: &ProjectDraft,
        image: Option<&ImageUpload>,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        let mut store = self.begin("update_project", Some(token))?;
        store.require_section(&data.section_id)?;
        let idx = store.project_index(id)?;
        let project = &mut store.projects[idx];
        project.title = data.title.clone();
        project.category = data.category.clone();
        project.description = Some(data.description.clone());
        project.section_id = data.section_id.clone();
        if let Some(path) = upload_path(image) {
            project.image = path;
        }
        Ok(())
    }

    fn delete_project(&self, id: &str, token: Option<&str>) -> Result<(), ApiError> {
        let mut store = self.begin("delete_project", Some(token))?;
        let idx = store.project_index(id)?;
        let removed = store.projects.remove(idx);
        if let Ok(pid) = removed.id.parse::<i64>() {
            store.impacts.retain(|i| i.project_id != pid);
            store.research.retain(|r| r.project_id != pid);
        }
        Ok(())
    }

    fn get_impact(&self, project_id: i64) -> Result<Vec<ProjectImpact>, ApiError> {
        let store = self.begin("get_impact", None)?;
        store.require_project(project_id)?;
        Ok(store
            .impacts
            .iter()
            .filter(|i| i.project_id == project_id)
            .cloned()
            .collect())
    }

    fn add_impact(
        &self,
        project_id: i64,
        data: &ImpactDraft,
        image: Option<&ImageUpload>,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        let mut store = self.begin("add_impact", Some(token))?;
        store.require_project(project_id)?;
        let id = store.next_id();
        store.impacts.push(ProjectImpact {
            id: Some(id),
            project_id,
            title: data.title.clone(),
            description: data.description.clone(),
            image_url: upload_path(image),
        });
        Ok(())
    }

    fn update_impact(
        &self,
        project_id: i64,
        id: i64,
        data: &ImpactDraft,
        image: Option<&ImageUpload>,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        let mut store = self.begin("update_impact", Some(token))?;
        let impact = store
            .impacts
            .iter_mut()
            .find(|i| i.project_id == project_id && i.id == Some(id))
            .ok_or_else(|| status(404, "impacto no encontrado"))?;
        impact.title = data.title.clone();
        impact.description = data.description.clone();
        if let Some(path) = upload_path(image) {
            impact.image_url = Some(path);
        }
        Ok(())
    }

    fn delete_impact(
        &self,
        project_id: i64,
        id: i64,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        let mut store = self.begin("delete_impact", Some(token))?;
        let before = store.impacts.len();
        store
            .impacts
            .retain(|i| !(i.project_id == project_id && i.id == Some(id)));
        if store.impacts.len() == before {
            return Err(status(404, "impacto no encontrado"));
        }
        Ok(())
    }

    fn get_research(&self, project_id: i64) -> Result<Vec<ProjectResearch>, ApiError> {
        let store = self.begin("get_research", None)?;
        store.require_project(project_id)?;
        Ok(store
            .research
            .iter()
            .filter(|r| r.project_id == project_id)
            .cloned()
            .collect())
    }

    fn add_research(
        &self,
        project_id: i64,
        data: &ResearchDraft,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        let mut store = self.begin("add_research", Some(token))?;
        store.require_project(project_id)?;
        let id = store.next_id();
        store.research.push(ProjectResearch {
            id: Some(id),
            project_id,
            title: data.title.clone(),
            link: data.link.clone(),
            copyright: Some(data.copyright.clone()),
        });
        Ok(())
    }

    fn update_research(
        &self,
        project_id: i64,
        id: i64,
        data: &ResearchDraft,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        let mut store = self.begin("update_research", Some(token))?;
        let research = store
            .research
            .iter_mut()
            .find(|r| r.project_id == project_id && r.id == Some(id))
            .ok_or_else(|| status(404, "investigación no encontrada"))?;
        research.title = data.title.clone();
        research.link = data.link.clone();
        research.copyright = Some(data.copyright.clone());
        Ok(())
    }

    fn delete_research(
        &self,
        project_id: i64,
        id: i64,
        token: Option<&str>,
    ) -> Result<(), ApiError> {
        let mut store = self.begin("delete_research", Some(token))?;
        let before = store.research.len();
        store
            .research
            .retain(|r| !(r.project_id == project_id && r.id == Some(id)));
        if store.research.len() == before {
            return Err(status(404, "investigación no encontrada"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(section_id: &str) -> ProjectDraft {
        ProjectDraft {
            title: "T".into(),
            category: "C".into(),
            description: "D".into(),
            section_id: section_id.into(),
        }
    }

    #[test]
    fn writes_require_admin_token() {
        let api = MemoryApi::new();
        let admin = api.add_account("admin@ods.org", "pw", "admin");
        let viewer = api.add_account("viewer@ods.org", "pw", "user");
        let section = NewSection {
            name: "Hambre cero".into(),
            image: "FaLeaf".into(),
            ods_id: 2,
        };

        let err = api.create_section(&section, None).unwrap_err();
        assert_eq!(err.status(), Some(401));
        let err = api
            .create_section(&section, Some(&viewer.token))
            .unwrap_err();
        assert_eq!(err.status(), Some(403));
        api.create_section(&section, Some(&admin.token)).unwrap();
        assert_eq!(api.get_sections().unwrap().len(), 1);
    }

    #[test]
    fn deleting_section_removes_its_projects() {
        let api = MemoryApi::new();
        let admin = api.add_account("admin@ods.org", "pw", "admin");
        let token = Some(admin.token.as_str());
        api.create_section(
            &NewSection {
                name: "Vida submarina".into(),
                image: "FaFish".into(),
                ods_id: 14,
            },
            token,
        )
        .unwrap();
        let section_id = api.get_sections().unwrap()[0].id.clone();
        api.create_project(&draft(&section_id), None, token).unwrap();
        assert_eq!(api.get_projects().unwrap().len(), 1);

        api.delete_section(&section_id, token).unwrap();
        assert!(api.get_projects().unwrap().is_empty());
    }

    #[test]
    fn project_in_unknown_section_is_rejected() {
        let api = MemoryApi::new();
        let admin = api.add_account("admin@ods.org", "pw", "admin");
        let err = api
            .create_project(&draft("99"), None, Some(&admin.token))
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn login_checks_password() {
        let api = MemoryApi::new();
        api.add_account("admin@ods.org", "pw", "admin");
        let bad = Credentials {
            email: "admin@ods.org".into(),
            password: "nope".into(),
        };
        assert_eq!(api.login(&bad).unwrap_err().status(), Some(401));
        assert_eq!(api.calls(), vec!["login"]);
    }
}
