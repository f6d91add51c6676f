pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

pub fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}

pub fn default_port() -> u16 {
    3000
}

pub fn default_models_file() -> String {
    "models_output.json".to_string()
}

pub fn default_prompt() -> String {
    "Hello, world!".to_string()
}
