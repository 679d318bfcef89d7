//! companies 명령어

use serde_json::{Map, Value};

use jobly_core::auth::AuthContext;
use jobly_db::{Company, NewCompany, Store};

use super::{or_dash, parse_data, print_json, OutputFormat};

/// `companies list` 필터 옵션
#[derive(Debug, Default)]
pub struct ListFilters {
    pub name: Option<String>,
    pub min_employees: Option<i64>,
    pub max_employees: Option<i64>,
}

impl ListFilters {
    /// 지정된 옵션만 필터 맵에 담습니다.
    pub fn to_attributes(&self) -> Map<String, Value> {
        let mut map = Map::new();
        if let Some(name) = &self.name {
            map.insert("name".to_string(), Value::from(name.as_str()));
        }
        if let Some(min) = self.min_employees {
            map.insert("minEmployees".to_string(), Value::from(min));
        }
        if let Some(max) = self.max_employees {
            map.insert("maxEmployees".to_string(), Value::from(max));
        }
        map
    }
}

fn print_company(company: &Company) {
    println!("- {} ({})", company.handle, company.name);
    println!("  employees: {}", or_dash(company.num_employees));
    if let Some(logo_url) = &company.logo_url {
        println!("  logo: {}", logo_url);
    }
}

pub async fn list(store: &Store, format: OutputFormat, filters: &ListFilters) -> anyhow::Result<()> {
    let filters = filters.to_attributes();
    let companies = store.companies().find_all(Some(&filters)).await?;

    if format == OutputFormat::Json {
        return print_json(&companies);
    }

    if companies.is_empty() {
        println!("No companies.");
        return Ok(());
    }
    for company in &companies {
        print_company(company);
    }
    Ok(())
}

pub async fn get(store: &Store, format: OutputFormat, handle: &str) -> anyhow::Result<()> {
    let detail = store.companies().get(handle).await?;

    if format == OutputFormat::Json {
        return print_json(&detail);
    }

    print_company(&detail.company);
    println!("  {}", detail.company.description);
    if detail.jobs.is_empty() {
        println!("  jobs: none");
    } else {
        println!("  jobs:");
        for job in &detail.jobs {
            println!(
                "    #{} {} salary={} equity={}",
                job.id,
                job.title,
                or_dash(job.salary),
                or_dash(job.equity)
            );
        }
    }
    Ok(())
}

pub async fn create(
    store: &Store,
    format: OutputFormat,
    actor: &AuthContext,
    new: &NewCompany,
) -> anyhow::Result<()> {
    let company = store.companies().create(actor, new).await?;

    if format == OutputFormat::Json {
        return print_json(&company);
    }
    println!("Company created: {}", company.handle);
    Ok(())
}

pub async fn update(
    store: &Store,
    format: OutputFormat,
    actor: &AuthContext,
    handle: &str,
    data: &str,
) -> anyhow::Result<()> {
    let data = parse_data(data)?;
    let company = store.companies().update(actor, handle, &data).await?;

    if format == OutputFormat::Json {
        return print_json(&company);
    }
    println!("Company updated:");
    print_company(&company);
    Ok(())
}

pub async fn remove(store: &Store, actor: &AuthContext, handle: &str) -> anyhow::Result<()> {
    store.companies().remove(actor, handle).await?;
    println!("Company removed: {}", handle);
    Ok(())
}
