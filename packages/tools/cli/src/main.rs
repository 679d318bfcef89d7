//! Jobly CLI (`jobly`)
//!
//! companies / jobs 데이터를 터미널에서 조회하고 관리합니다.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobly_core::auth::AuthContext;
use jobly_db::{DbConfig, Store};

mod commands;

use commands::OutputFormat;

#[derive(Parser)]
#[command(name = "jobly")]
#[command(author, version, about = "Jobly CLI - companies and jobs", long_about = None)]
struct Cli {
    /// Act as this user
    #[arg(long, global = true)]
    user: Option<String>,

    /// Act with admin privileges (requires --user)
    #[arg(long, global = true)]
    admin: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn actor(&self) -> AuthContext {
        match &self.user {
            Some(user) if self.admin => AuthContext::admin(user.clone()),
            Some(user) => AuthContext::user(user.clone()),
            None => AuthContext::anonymous(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    // ─────────────────────────────────────────────────────────────────────────
    // Companies
    // ─────────────────────────────────────────────────────────────────────────
    /// Manage companies
    Companies {
        #[command(subcommand)]
        action: CompanyAction,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Jobs
    // ─────────────────────────────────────────────────────────────────────────
    /// Manage jobs
    Jobs {
        #[command(subcommand)]
        action: JobAction,
    },
}

#[derive(Subcommand)]
enum CompanyAction {
    /// List companies
    List {
        /// Case-insensitive name match
        #[arg(long)]
        name: Option<String>,
        /// Minimum number of employees
        #[arg(long)]
        min_employees: Option<i64>,
        /// Maximum number of employees
        #[arg(long)]
        max_employees: Option<i64>,
    },
    /// Show a company with its jobs
    Get { handle: String },
    /// Create a company (admin)
    Create {
        #[arg(long)]
        handle: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        num_employees: Option<i32>,
        #[arg(long)]
        logo_url: Option<String>,
    },
    /// Partially update a company (admin)
    Update {
        handle: String,
        /// JSON object, e.g. '{"name":"New","numEmployees":10}'
        #[arg(long)]
        data: String,
    },
    /// Remove a company (admin)
    Remove { handle: String },
}

#[derive(Subcommand)]
enum JobAction {
    /// List jobs
    List {
        /// Case-insensitive title match
        #[arg(long)]
        title: Option<String>,
        /// Minimum salary
        #[arg(long)]
        min_salary: Option<i64>,
        /// Only jobs with non-zero equity
        #[arg(long)]
        has_equity: bool,
    },
    /// Show a job
    Get { id: i32 },
    /// Create a job (admin)
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        company_handle: String,
        #[arg(long)]
        salary: Option<i32>,
        #[arg(long)]
        equity: Option<f64>,
    },
    /// Partially update a job (admin)
    Update {
        id: i32,
        /// JSON object, e.g. '{"salary":1000}'
        #[arg(long)]
        data: String,
    },
    /// Remove a job (admin)
    Remove { id: i32 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobly=info,jobly_db=debug".into()),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let actor = cli.actor();
    let format = cli.format;
    tracing::debug!("Running as {:?}", actor);

    // 설정 로드 및 연결
    let config = DbConfig::from_env()?;
    let store = Store::connect(&config).await?;

    // 명령 실행
    match cli.command {
        Commands::Companies { action } => match action {
            CompanyAction::List { name, min_employees, max_employees } => {
                let filters = commands::companies::ListFilters { name, min_employees, max_employees };
                commands::companies::list(&store, format, &filters).await
            }
            CompanyAction::Get { handle } => commands::companies::get(&store, format, &handle).await,
            CompanyAction::Create { handle, name, description, num_employees, logo_url } => {
                let new = jobly_db::NewCompany { handle, name, description, num_employees, logo_url };
                commands::companies::create(&store, format, &actor, &new).await
            }
            CompanyAction::Update { handle, data } => {
                commands::companies::update(&store, format, &actor, &handle, &data).await
            }
            CompanyAction::Remove { handle } => {
                commands::companies::remove(&store, &actor, &handle).await
            }
        },

        Commands::Jobs { action } => match action {
            JobAction::List { title, min_salary, has_equity } => {
                let filters = commands::jobs::ListFilters { title, min_salary, has_equity };
                commands::jobs::list(&store, format, &filters).await
            }
            JobAction::Get { id } => commands::jobs::get(&store, format, id).await,
            JobAction::Create { title, company_handle, salary, equity } => {
                let new = jobly_db::NewJob { title, salary, equity, company_handle };
                commands::jobs::create(&store, format, &actor, &new).await
            }
            JobAction::Update { id, data } => {
                commands::jobs::update(&store, format, &actor, id, &data).await
            }
            JobAction::Remove { id } => commands::jobs::remove(&store, &actor, id).await,
        },
    }
}
