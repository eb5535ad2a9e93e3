use log::LevelFilter;

#[derive(Debug, Default, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
}

impl AppSettings {
    pub fn load() -> Self {
        // STATFUT_LOG accepts the usual level names (error, warn, info, ...).
        let log_level = std::env::var("STATFUT_LOG")
            .ok()
            .and_then(|v| v.parse::<LevelFilter>().ok());
        Self { full_screen: false, log_level }
    }
}
