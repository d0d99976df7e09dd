use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ExperienceDto {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResumeDto {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceDto>,
    #[serde(default)]
    pub uploaded_at: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {

    use super::ResumeDto;

    #[test]
    pub fn test_serde_json() {
        // list/detail payloads carry the Mongo-style `_id`
        let dto_str = r#"{
            "_id": "665f1c2e9b1e8a3d2c4b5a69",
            "name": "Jane Doe",
            "email": "jane@example.com",
            "phone": "+1 555 0100",
            "skills": ["Python", "React"],
            "experience": [{"role": "Engineer", "company": "Acme"}],
            "uploaded_at": "2024-06-04T12:00:00"
        }"#;
        let dto: ResumeDto = serde_json::from_str(dto_str).unwrap();
        assert_eq!("665f1c2e9b1e8a3d2c4b5a69", dto.id);
        assert_eq!("Jane Doe", dto.name);
        assert_eq!(vec!["Python", "React"], dto.skills);
        assert_eq!("Engineer", dto.experience[0].role);
        assert_eq!("", dto.experience[0].duration);
        assert!(dto.tags.is_empty());
    }

    #[test]
    pub fn test_plain_id_and_missing_collections() {
        let dto_str = r#"{"id":"r1","name":"A","email":"a@b.c","phone":"1","uploaded_at":null}"#;
        let dto: ResumeDto = serde_json::from_str(dto_str).unwrap();
        assert_eq!("r1", dto.id);
        assert!(dto.skills.is_empty());
        assert!(dto.experience.is_empty());
        assert!(dto.uploaded_at.is_none());
    }
}
