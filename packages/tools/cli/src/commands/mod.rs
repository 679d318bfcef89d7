//! CLI 명령어 구현

pub mod companies;
pub mod jobs;

use serde::Serialize;
use serde_json::{Map, Value};

/// 출력 형식
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// `--data` 인자를 JSON 객체로 파싱
pub(crate) fn parse_data(input: &str) -> anyhow::Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(input)? {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!("--data must be a JSON object, got: {}", other),
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
