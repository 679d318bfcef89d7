//! jobs 명령어

use serde_json::{Map, Value};

use jobly_core::auth::AuthContext;
use jobly_db::{Job, NewJob, Store};

use super::{or_dash, parse_data, print_json, OutputFormat};

/// `jobs list` 필터 옵션
#[derive(Debug, Default)]
pub struct ListFilters {
    pub title: Option<String>,
    pub min_salary: Option<i64>,
    pub has_equity: bool,
}

impl ListFilters {
    pub fn to_attributes(&self) -> Map<String, Value> {
        let mut map = Map::new();
        if let Some(title) = &self.title {
            map.insert("title".to_string(), Value::from(title.as_str()));
        }
        if let Some(min) = self.min_salary {
            map.insert("minSalary".to_string(), Value::from(min));
        }
        if self.has_equity {
            map.insert("hasEquity".to_string(), Value::Bool(true));
        }
        map
    }
}

fn print_job(job: &Job) {
    println!("- #{} {} @ {}", job.id, job.title, job.company_handle);
    println!("  salary: {}  equity: {}", or_dash(job.salary), or_dash(job.equity));
}

pub async fn list(store: &Store, format: OutputFormat, filters: &ListFilters) -> anyhow::Result<()> {
    let filters = filters.to_attributes();
    let jobs = store.jobs().find_all(Some(&filters)).await?;

    if format == OutputFormat::Json {
        return print_json(&jobs);
    }

    if jobs.is_empty() {
        println!("No jobs.");
        return Ok(());
    }
    for job in &jobs {
        print_job(job);
    }
    Ok(())
}

pub async fn get(store: &Store, format: OutputFormat, id: i32) -> anyhow::Result<()> {
    let job = store.jobs().get(id).await?;

    if format == OutputFormat::Json {
        return print_json(&job);
    }
    print_job(&job);
    Ok(())
}

pub async fn create(
    store: &Store,
    format: OutputFormat,
    actor: &AuthContext,
    new: &NewJob,
) -> anyhow::Result<()> {
    let job = store.jobs().create(actor, new).await?;

    if format == OutputFormat::Json {
        return print_json(&job);
    }
    println!("Job created: #{}", job.id);
    Ok(())
}

pub async fn update(
    store: &Store,
    format: OutputFormat,
    actor: &AuthContext,
    id: i32,
    data: &str,
) -> anyhow::Result<()> {
    let data = parse_data(data)?;
    let job = store.jobs().update(actor, id, &data).await?;

    if format == OutputFormat::Json {
        return print_json(&job);
    }
    println!("Job updated:");
    print_job(&job);
    Ok(())
}

pub async fn remove(store: &Store, actor: &AuthContext, id: i32) -> anyhow::Result<()> {
    store.jobs().remove(actor, id).await?;
    println!("Job removed: #{}", id);
    Ok(())
}
