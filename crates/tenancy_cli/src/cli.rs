use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use log::info;
use serde_json::{json, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::process::ExitCode;
use tenancy_core::config::DB_PATH_VAR;
use tenancy_core::{
    init_from_config, open_db, open_db_in_memory, ApartmentId, ApartmentService,
    ApplicationService, CascadeReport, ConfigError, CoreConfig, DbError, DomainError, ErrorKind,
    LoggingError, RepoError, SqliteStore, UserDetails, UserId, UserService,
};

#[derive(Parser, Debug)]
#[command(
    name = "tenancy",
    about = "Inspect and maintain users, apartments, and rental applications",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the core library is linked and report its version
    Ping,
    #[command(flatten)]
    Store(StoreCommand),
}

/// Commands that open the configured database.
#[derive(Subcommand, Debug)]
enum StoreCommand {
    /// Manage users
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },
    /// Manage apartments
    Apartments {
        #[command(subcommand)]
        command: ApartmentsCommand,
    },
    /// Inspect rental applications
    Applications {
        #[command(subcommand)]
        command: ApplicationsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum UsersCommand {
    /// List all users ordered by id
    List,
    /// Register a new user
    Add(AddUserArgs),
    /// Delete a user with their apartments and applications
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
enum ApartmentsCommand {
    /// List all apartments ordered by id
    List,
    /// Delete a vacant apartment and its applications
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
enum ApplicationsCommand {
    /// List all applications ordered by id
    List,
}

#[derive(Args, Debug)]
struct AddUserArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    email: String,
    /// Ten digits, no separators
    #[arg(long)]
    phone_number: String,
    /// Birth date as YYYY-MM-DD
    #[arg(long)]
    birth_date: NaiveDate,
}

impl From<AddUserArgs> for UserDetails {
    fn from(args: AddUserArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone_number: args.phone_number,
            birth_date: args.birth_date,
        }
    }
}

#[derive(Debug)]
pub(crate) enum CliError {
    Config(ConfigError),
    Logging(LoggingError),
    Db(DbError),
    Repo(RepoError),
    Domain(DomainError),
    Output(serde_json::Error),
    /// A mutating command was run without a persistent database.
    MemoryDatabase(&'static str),
}

impl CliError {
    /// 2 for rejected input, 1 for everything else.
    pub(crate) fn exit_code(&self) -> ExitCode {
        match self {
            Self::Domain(err) if err.kind() != ErrorKind::Store => ExitCode::from(2),
            Self::Config(_) | Self::MemoryDatabase(_) => ExitCode::from(2),
            _ => ExitCode::FAILURE,
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid configuration: {err}"),
            Self::Logging(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "failed to open database: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Domain(err) => write!(f, "{} ({})", err, err.kind().as_str()),
            Self::Output(err) => write!(f, "failed to render output: {err}"),
            Self::MemoryDatabase(command) => write!(
                f,
                "`{command}` would only change a throwaway in-memory database; set {DB_PATH_VAR}"
            ),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Logging(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Domain(err) => Some(err),
            Self::Output(err) => Some(err),
            Self::MemoryDatabase(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for CliError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<DomainError> for CliError {
    fn from(value: DomainError) -> Self {
        Self::Domain(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output(value)
    }
}

impl StoreCommand {
    /// Name of the command when it writes to the store.
    fn mutation_name(&self) -> Option<&'static str> {
        match self {
            Self::Users {
                command: UsersCommand::Add(_),
            } => Some("users add"),
            Self::Users {
                command: UsersCommand::Delete { .. },
            } => Some("users delete"),
            Self::Apartments {
                command: ApartmentsCommand::Delete { .. },
            } => Some("apartments delete"),
            _ => None,
        }
    }
}

pub(crate) fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let config = CoreConfig::from_env()?;
    init_from_config(&config.logging)?;

    let output = match cli.command {
        Command::Ping => json!({
            "ping": tenancy_core::ping(),
            "version": tenancy_core::core_version(),
        }),
        Command::Store(command) => run_with_store(&config, command)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Rejects writes that would be lost when the process exits.
fn ensure_persistent(config: &CoreConfig, command: &StoreCommand) -> Result<(), CliError> {
    match command.mutation_name() {
        Some(name) if config.db_path.is_none() => Err(CliError::MemoryDatabase(name)),
        _ => Ok(()),
    }
}

fn run_with_store(config: &CoreConfig, command: StoreCommand) -> Result<Value, CliError> {
    ensure_persistent(config, &command)?;
    let conn = match &config.db_path {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let store = SqliteStore::try_new(&conn)?;
    info!(
        "event=cli_run module=cli status=start persistent={}",
        config.db_path.is_some()
    );

    let output = match command {
        StoreCommand::Users { command } => {
            let users = UserService::new(store);
            match command {
                UsersCommand::List => serde_json::to_value(users.list_all()?)?,
                UsersCommand::Add(args) => serde_json::to_value(users.create(args.into())?)?,
                UsersCommand::Delete { id } => {
                    let id = UserId(id);
                    report_json(id.get(), users.delete(id)?)
                }
            }
        }
        StoreCommand::Apartments { command } => {
            let apartments = ApartmentService::new(store);
            match command {
                ApartmentsCommand::List => serde_json::to_value(apartments.list_all()?)?,
                ApartmentsCommand::Delete { id } => {
                    let id = ApartmentId(id);
                    report_json(id.get(), apartments.delete(id)?)
                }
            }
        }
        StoreCommand::Applications {
            command: ApplicationsCommand::List,
        } => serde_json::to_value(ApplicationService::new(store).list_all()?)?,
    };
    Ok(output)
}

fn report_json(deleted_id: i64, report: CascadeReport) -> Value {
    json!({
        "deleted_id": deleted_id,
        "apartments_removed": report.apartments_removed,
        "applications_removed": report.applications_removed,
    })
}
