use std::env;

pub const GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const GEMINI_TEMPERATURE: f32 = 0.1;
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";

pub const DSM5_SYSTEM_INSTRUCTION: &str = "Você é um assistente de IA altamente especializado. \
Sua única fonte de informação e referência para responder a todas as perguntas é o Manual \
Diagnóstico e Estatístico de Transtornos Mentais, 5ª Edição (DSM-5). SE VOCÊ NÃO PUDER ENCONTRAR \
A INFORMAÇÃO NO DSM-5, você deve responder com clareza que a informação solicitada está fora de \
sua base de conhecimento restrita ao DSM-5 ou solicitar que o usuário reformule a pergunta usando \
termos do manual. Não invente ou use outras fontes. Mantenha as respostas focadas e clinicamente \
relevantes.";

pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:8080/dsm5Query";

/// Relay server settings, read once at process start.
pub struct Config {
    pub host: String,
    pub port: u16,
    pub gemini_url: String,
    pub gemini_key: Option<String>,
    pub system_instruction: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("SERVER_PORT")
                .map_or_else(|_| 8080, |value| value.parse().unwrap_or(8080)),
            gemini_url: env::var("GEMINI_URL").unwrap_or_else(|_| DEFAULT_GEMINI_URL.to_string()),
            gemini_key: env::var("GEMINI_KEY").ok().filter(|key| !key.trim().is_empty()),
            system_instruction: env::var("SYSTEM_INSTRUCTION")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| DSM5_SYSTEM_INSTRUCTION.to_string()),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatMode {
    /// Talk to a running `dsm5-relay` over HTTP.
    Remote,
    /// Run the relay in-process.
    Direct,
}

impl ChatMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "remote" | "http" => Some(ChatMode::Remote),
            "direct" | "local" => Some(ChatMode::Direct),
            _ => None,
        }
    }
}

pub struct ClientConfig {
    pub relay_url: String,
    pub mode: ChatMode,
    pub log_file: Option<String>,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self {
            relay_url: env::var("RELAY_URL").unwrap_or_else(|_| DEFAULT_RELAY_URL.to_string()),
            mode: env::var("CHAT_MODE")
                .ok()
                .and_then(|value| ChatMode::parse(&value))
                .unwrap_or(ChatMode::Remote),
            log_file: env::var("CHAT_LOG_FILE").ok(),
        }
    }
}
