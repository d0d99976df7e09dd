pub enum ApiRoute {
    Upload,
    Resumes,
    Resume(String),
}

impl ApiRoute {
    fn path(&self) -> String {
        match self {
            ApiRoute::Upload => "/upload".to_string(),
            ApiRoute::Resumes => "/resumes".to_string(),
            ApiRoute::Resume(id) => format!("/resumes/{}", id),
        }
    }

    pub fn target(&self, base_url: impl AsRef<str>) -> String {
        format!("{}{}", base_url.as_ref().trim_end_matches('/'), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::ApiRoute;

    #[test]
    pub fn test_target() {
        let base = "http://localhost:8000";
        assert_eq!("http://localhost:8000/upload", ApiRoute::Upload.target(base));
        assert_eq!(
            "http://localhost:8000/resumes",
            ApiRoute::Resumes.target("http://localhost:8000/")
        );
        assert_eq!(
            "http://localhost:8000/resumes/abc123",
            ApiRoute::Resume("abc123".to_string()).target(base)
        );
    }
}
