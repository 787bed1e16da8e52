pub struct DefaultsConfig {
    pub debug: bool,
    pub threshold: String,
    pub selection: Vec<String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            debug: false,
            threshold: "auto".to_string(),
            selection: vec!["all".to_string()],
        }
    }
}
