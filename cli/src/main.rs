//! `expense-cli`: terminal client for the ExpenseFlow backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs the same session model as the browser (`access::SessionStore`) with a
//! `reqwest` transport and a credential file. Every command except `login`,
//! `register` and `logout` first restores the stored session and then checks
//! the command's role requirement with `access::can_access` before it makes
//! any request.

mod console;
mod credentials;
mod http;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::path::PathBuf;
use std::process::ExitCode;

use access::capability::{ADMINS, APPROVERS, EVERYONE};
use access::expenses::{DateRange, ExpenseFilter, SortKey, SortOrder, TeamStats, apply, parse_sort};
use access::export::expenses_csv;
use access::format::{format_currency, format_date, iso_date, status_label};
use access::types::{
    ApprovalAction, ApprovalRequest, Category, DashboardStats, Expense, ExpensePolicy, ExpenseReport, ExpenseStatus,
    Notification, ProfileUpdate, Role, User, UserUpdate,
};
use access::validate::{
    generate_password, validate_login, validate_new_expense, validate_new_user, validate_registration,
};
use access::{
    ApiError, GateState, NAV_ITEMS, Route, SessionStore, ValidationError, ViewScope, can_access, endpoints, visible_items,
};
use clap::{ArgAction, Args, Parser, Subcommand};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

use crate::console::ConsoleListener;
use crate::credentials::{FileCredentialStore, default_token_path};
use crate::http::HttpApi;

type Session = SessionStore<HttpApi, FileCredentialStore, ConsoleListener>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("no config directory found; pass --token-file or set EXPENSE_TOKEN_FILE")]
    NoTokenPath,
    #[error("not signed in; run `expense-cli login` first")]
    NotSignedIn,
    #[error("`{command}` is not available to the {role} role")]
    Forbidden { command: &'static str, role: Role },
    #[error("sign-in failed")]
    SignInFailed,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{}", describe_api_error(.0))]
    Api(#[from] ApiError),
    #[error("invalid {field}: {value}")]
    InvalidArgument { field: &'static str, value: String },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
}

fn describe_api_error(err: &ApiError) -> String {
    match err {
        ApiError::Unauthorized { .. } => "session expired; run `expense-cli login` again".to_owned(),
        ApiError::Status { status, detail: Some(detail) } => format!("backend returned {status}: {detail}"),
        ApiError::Status { status, detail: None } => format!("backend returned {status}"),
        ApiError::Network(_) | ApiError::Decode(_) => err.to_string(),
    }
}

#[derive(Parser, Debug)]
#[command(name = "expense-cli", about = "ExpenseFlow terminal client")]
struct Cli {
    #[arg(long, env = "EXPENSE_BASE_URL", default_value = "http://127.0.0.1:8001/api")]
    base_url: String,

    /// Where the session credential is kept.
    #[arg(long, env = "EXPENSE_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and keep the credential for later commands.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "EXPENSE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create a company and its first admin account.
    Register(RegisterArgs),
    /// Forget the stored credential.
    Logout,
    /// Show the signed-in user.
    Whoami,
    /// List the sections available to the signed-in role.
    Nav,
    Dashboard,
    Categories,
    Analytics {
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Edit profile details; your own unless `--user` is given.
    Profile(ProfileArgs),
    Expenses(ExpensesCommand),
    Team(TeamCommand),
    Users(UsersCommand),
    Policies(PoliciesCommand),
    Reports(ReportsCommand),
    Notifications(NotificationsCommand),
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    full_name: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "EXPENSE_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long, default_value = "")]
    company_name: String,
    #[arg(long, default_value = "US")]
    country: String,
}

/// Filters and ordering shared by the expense listings.
#[derive(Args, Debug)]
struct ListArgs {
    #[arg(long, default_value = "")]
    search: String,
    #[arg(long)]
    status: Option<ExpenseStatus>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    employee: Option<String>,
    /// all, week, month, quarter or year.
    #[arg(long, default_value = "all")]
    range: DateRange,
    /// `<date|amount|employee|status|category>-<asc|desc>`.
    #[arg(long, default_value = "date-desc")]
    sort: String,
    /// Print raw JSON instead of one line per expense.
    #[arg(long)]
    json: bool,
    /// Print CSV (Date, Employee, Description, Category, Amount, Status).
    #[arg(long, conflicts_with = "json")]
    csv: bool,
}

impl ListArgs {
    fn filter(&self, now: OffsetDateTime) -> ExpenseFilter {
        ExpenseFilter {
            search: self.search.clone(),
            status: self.status,
            category: self.category.clone(),
            employee_id: self.employee.clone(),
            since: self.range.cutoff(now),
        }
    }

    fn order(&self) -> Result<(SortKey, SortOrder), CliError> {
        parse_sort(&self.sort).ok_or_else(|| CliError::InvalidArgument {
            field: "sort",
            value: self.sort.clone(),
        })
    }
}

/// Fields accepted by `PUT /users/{id}`.
#[derive(Args, Debug)]
struct ProfileArgs {
    /// Edit another user's profile (admins only).
    #[arg(long)]
    user: Option<String>,
    #[arg(long)]
    full_name: Option<String>,
    #[arg(long)]
    department: Option<String>,
    #[arg(long)]
    job_title: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    manager_id: Option<String>,
}

impl ProfileArgs {
    fn into_update(self) -> Result<(Option<String>, ProfileUpdate), CliError> {
        let update = ProfileUpdate {
            full_name: self.full_name,
            department: self.department,
            job_title: self.job_title,
            phone: self.phone,
            address: self.address,
            manager_id: self.manager_id,
        }
        .trimmed();
        if update.is_empty() {
            return Err(CliError::InvalidArgument {
                field: "profile",
                value: "nothing to change".to_owned(),
            });
        }
        Ok((self.user, update))
    }
}

#[derive(Args, Debug)]
struct ExpensesCommand {
    #[command(subcommand)]
    command: ExpensesSubcommand,
}

#[derive(Subcommand, Debug)]
enum ExpensesSubcommand {
    List(ListArgs),
    Create {
        #[arg(long)]
        amount: String,
        #[arg(long, default_value = "USD")]
        currency: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        description: String,
        /// `YYYY-MM-DD`; defaults to today.
        #[arg(long)]
        date: Option<String>,
    },
    /// Expenses awaiting your decision.
    Pending,
    Approve {
        expense_id: String,
        #[arg(long)]
        reject: bool,
        #[arg(long, default_value = "")]
        comment: String,
    },
}

#[derive(Args, Debug)]
struct TeamCommand {
    #[command(subcommand)]
    command: TeamSubcommand,
}

#[derive(Subcommand, Debug)]
enum TeamSubcommand {
    Members,
    Expenses(ListArgs),
    Pending,
}

#[derive(Args, Debug)]
struct UsersCommand {
    #[command(subcommand)]
    command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
enum UsersSubcommand {
    List,
    Create {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(
            long,
            env = "EXPENSE_NEW_USER_PASSWORD",
            hide_env_values = true,
            required_unless_present = "generate_password"
        )]
        password: Option<String>,
        /// Generate a temporary password and print it.
        #[arg(long, conflicts_with = "password")]
        generate_password: bool,
        #[arg(long, default_value = "employee")]
        role: Role,
        #[arg(long)]
        manager_id: Option<String>,
    },
    Update {
        user_id: String,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        role: Option<Role>,
        #[arg(long)]
        manager_id: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    Delete {
        user_id: String,
    },
}

#[derive(Args, Debug)]
struct PolicyArgs {
    #[arg(long)]
    category: String,
    #[arg(long)]
    max_amount: f64,
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    requires_receipt: bool,
    #[arg(long)]
    auto_approve_limit: Option<f64>,
}

impl PolicyArgs {
    fn into_policy(self) -> Result<ExpensePolicy, CliError> {
        if !self.max_amount.is_finite() || self.max_amount <= 0.0 {
            return Err(CliError::InvalidArgument {
                field: "max-amount",
                value: self.max_amount.to_string(),
            });
        }
        Ok(ExpensePolicy {
            id: None,
            company_id: None,
            category: self.category,
            max_amount: self.max_amount,
            requires_receipt: self.requires_receipt,
            auto_approve_limit: self.auto_approve_limit,
        })
    }
}

#[derive(Args, Debug)]
struct PoliciesCommand {
    #[command(subcommand)]
    command: PoliciesSubcommand,
}

#[derive(Subcommand, Debug)]
enum PoliciesSubcommand {
    List,
    Create(PolicyArgs),
    Update {
        policy_id: String,
        #[command(flatten)]
        policy: PolicyArgs,
    },
    Delete {
        policy_id: String,
    },
}

#[derive(Args, Debug)]
struct ReportsCommand {
    #[command(subcommand)]
    command: ReportsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ReportsSubcommand {
    List,
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Expense to include; repeat for several.
        #[arg(long = "expense")]
        expense_ids: Vec<String>,
    },
    Submit {
        report_id: String,
    },
}

#[derive(Args, Debug)]
struct NotificationsCommand {
    #[command(subcommand)]
    command: NotificationsSubcommand,
}

#[derive(Subcommand, Debug)]
enum NotificationsSubcommand {
    List {
        #[arg(long)]
        unread: bool,
    },
    Read {
        notification_id: String,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Register(_) => "register",
            Self::Logout => "logout",
            Self::Whoami => "whoami",
            Self::Nav => "nav",
            Self::Dashboard => "dashboard",
            Self::Categories => "categories",
            Self::Analytics { .. } => "analytics",
            Self::Profile(_) => "profile",
            Self::Expenses(_) => "expenses",
            Self::Team(_) => "team",
            Self::Users(_) => "users",
            Self::Policies(_) => "policies",
            Self::Reports(_) => "reports",
            Self::Notifications(_) => "notifications",
        }
    }

    /// Roles allowed to run the command, or `None` when no session is needed.
    fn required_roles(&self) -> Option<&'static [Role]> {
        let roles = match self {
            Self::Login { .. } | Self::Register(_) | Self::Logout => return None,
            Self::Whoami | Self::Nav | Self::Categories | Self::Reports(_) => EVERYONE,
            Self::Dashboard => Route::Dashboard.required_roles(),
            Self::Analytics { .. } => APPROVERS,
            Self::Profile(args) if args.user.is_some() => ADMINS,
            Self::Profile(_) => EVERYONE,
            Self::Expenses(expenses) => match expenses.command {
                ExpensesSubcommand::List(_) => Route::Expenses.required_roles(),
                ExpensesSubcommand::Create { .. } => Route::CreateExpense.required_roles(),
                ExpensesSubcommand::Pending | ExpensesSubcommand::Approve { .. } => Route::Approvals.required_roles(),
            },
            Self::Team(_) => Route::TeamExpenses.required_roles(),
            Self::Users(_) => Route::AdminUsers.required_roles(),
            Self::Policies(policies) => match policies.command {
                PoliciesSubcommand::List => EVERYONE,
                _ => ADMINS,
            },
            Self::Notifications(_) => Route::Notifications.required_roles(),
        };
        Some(roles)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!(?error, "command failed");
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let token_path = cli.token_file.or_else(default_token_path).ok_or(CliError::NoTokenPath)?;
    let store = FileCredentialStore::new(token_path);
    tracing::debug!(base_url = %cli.base_url, token_file = %store.path().display(), "starting");
    let session: Session = SessionStore::new(HttpApi::new(cli.base_url), store, ConsoleListener);

    let Some(required) = cli.command.required_roles() else {
        return run_public(&session, cli.command).await;
    };
    let role = match session.restore().await {
        GateState::Authenticated(role) => role,
        GateState::Anonymous | GateState::Unresolved => return Err(CliError::NotSignedIn),
    };
    if !can_access(Some(role), required) {
        return Err(CliError::Forbidden {
            command: cli.command.name(),
            role,
        });
    }
    run_authenticated(&session, role, cli.command).await
}

async fn run_public(session: &Session, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { email, password } => {
            let request = validate_login(&email, &password)?;
            if session.login(&request.email, &request.password).await {
                Ok(())
            } else {
                Err(CliError::SignInFailed)
            }
        }
        Command::Register(args) => {
            let request = validate_registration(
                &args.full_name,
                &args.email,
                &args.password,
                &args.company_name,
                &args.country,
            )?;
            if session.register(&request).await {
                Ok(())
            } else {
                Err(CliError::SignInFailed)
            }
        }
        Command::Logout => {
            session.logout();
            Ok(())
        }
        other => Err(CliError::InvalidArgument {
            field: "command",
            value: other.name().to_owned(),
        }),
    }
}

async fn run_authenticated(session: &Session, role: Role, command: Command) -> Result<(), CliError> {
    match command {
        Command::Whoami => {
            if let Some(user) = session.snapshot().user() {
                for line in user_summary(user) {
                    println!("{line}");
                }
            }
            Ok(())
        }
        Command::Nav => {
            for item in visible_items(NAV_ITEMS, Some(role)) {
                println!("{:<18} {}", item.label, item.route.path());
            }
            Ok(())
        }
        Command::Dashboard => {
            let stats: DashboardStats = request(session, Method::GET, endpoints::DASHBOARD_STATS, None).await?;
            for line in stats_lines(&stats) {
                println!("{line}");
            }
            Ok(())
        }
        Command::Categories => {
            let categories: Vec<Category> = request(session, Method::GET, endpoints::CATEGORIES, None).await?;
            for category in categories {
                let receipt = if category.requires_receipt { "  (receipt required)" } else { "" };
                println!("{:<16} {}{receipt}", category.name, category.label);
            }
            Ok(())
        }
        Command::Analytics {
            start_date,
            end_date,
            category,
        } => {
            let path = endpoints::analytics(start_date.as_deref(), end_date.as_deref(), category.as_deref());
            let json: Value = request(session, Method::GET, &path, None).await?;
            print_json(&json)
        }
        Command::Profile(args) => {
            let (target, update) = args.into_update()?;
            let user_id = match target {
                Some(user_id) => user_id,
                None => session.snapshot().user().map(|user| user.id.clone()).ok_or(CliError::NotSignedIn)?,
            };
            let body = serde_json::to_value(&update)?;
            let _: Value = request(session, Method::PUT, &endpoints::user(&user_id), Some(&body)).await?;
            println!("updated profile of {user_id}");
            Ok(())
        }
        Command::Expenses(expenses) => run_expenses(session, expenses.command).await,
        Command::Team(team) => run_team(session, team.command).await,
        Command::Users(users) => run_users(session, users.command).await,
        Command::Policies(policies) => run_policies(session, policies.command).await,
        Command::Reports(reports) => run_reports(session, reports.command).await,
        Command::Notifications(notifications) => run_notifications(session, notifications.command).await,
        Command::Login { .. } | Command::Register(_) | Command::Logout => run_public(session, command).await,
    }
}

async fn run_expenses(session: &Session, command: ExpensesSubcommand) -> Result<(), CliError> {
    match command {
        ExpensesSubcommand::List(args) => {
            let all: Vec<Expense> = request(session, Method::GET, endpoints::EXPENSES, None).await?;
            print_expenses(&all, &args, false)
        }
        ExpensesSubcommand::Create {
            amount,
            currency,
            category,
            description,
            date,
        } => {
            let date = date.unwrap_or_else(|| iso_date(OffsetDateTime::now_utc().date()));
            let expense = validate_new_expense(&amount, &currency, &category, &description, &date)?;
            let body = serde_json::to_value(&expense)?;
            let created: Expense = request(session, Method::POST, endpoints::EXPENSES, Some(&body)).await?;
            println!("created expense {}", created.id);
            if let Some(reason) = created.violation_reason.filter(|_| created.policy_violation) {
                println!("policy violation: {reason}");
            }
            Ok(())
        }
        ExpensesSubcommand::Pending => {
            let pending: Vec<Expense> = request(session, Method::GET, endpoints::EXPENSES_PENDING, None).await?;
            for expense in &pending {
                println!("{}", expense_line(expense, true));
            }
            Ok(())
        }
        ExpensesSubcommand::Approve {
            expense_id,
            reject,
            comment,
        } => {
            let action = if reject { ApprovalAction::Reject } else { ApprovalAction::Approve };
            let body = serde_json::to_value(ApprovalRequest::new(action, &comment))?;
            let _: Value = request(session, Method::POST, &endpoints::approve_expense(&expense_id), Some(&body)).await?;
            let verb = if reject { "rejected" } else { "approved" };
            println!("{verb} expense {expense_id}");
            Ok(())
        }
    }
}

async fn run_team(session: &Session, command: TeamSubcommand) -> Result<(), CliError> {
    match command {
        TeamSubcommand::Members => {
            let members: Vec<User> = request(session, Method::GET, endpoints::MANAGER_TEAM, None).await?;
            for member in &members {
                println!("{}", user_line(member));
            }
            Ok(())
        }
        TeamSubcommand::Expenses(args) => {
            let all: Vec<Expense> = request(session, Method::GET, endpoints::MANAGER_TEAM_EXPENSES, None).await?;
            print_expenses(&all, &args, true)
        }
        TeamSubcommand::Pending => {
            let pending: Vec<Expense> = request(session, Method::GET, endpoints::MANAGER_TEAM_PENDING, None).await?;
            for expense in &pending {
                println!("{}", expense_line(expense, true));
            }
            Ok(())
        }
    }
}

async fn run_users(session: &Session, command: UsersSubcommand) -> Result<(), CliError> {
    match command {
        UsersSubcommand::List => {
            let users: Vec<User> = request(session, Method::GET, endpoints::ADMIN_USERS, None).await?;
            for user in &users {
                println!("{}", user_line(user));
            }
            Ok(())
        }
        UsersSubcommand::Create {
            full_name,
            email,
            password,
            generate_password: generate,
            role,
            manager_id,
        } => {
            let password = match password {
                Some(password) if !generate => password,
                _ => generate_password(&mut rand::rng()),
            };
            let new_user = validate_new_user(&full_name, &email, &password, Some(role), manager_id.as_deref())?;
            let body = serde_json::to_value(&new_user)?;
            let created: User = request(session, Method::POST, endpoints::ADMIN_USERS, Some(&body)).await?;
            println!("created user {} ({})", created.email, created.id);
            if generate {
                println!("temporary password: {password}");
            }
            Ok(())
        }
        UsersSubcommand::Update {
            user_id,
            full_name,
            role,
            manager_id,
            active,
        } => {
            let update = UserUpdate {
                full_name,
                role,
                manager_id,
                is_active: active,
            };
            if update.is_empty() {
                return Err(CliError::InvalidArgument {
                    field: "update",
                    value: "nothing to change".to_owned(),
                });
            }
            let body = serde_json::to_value(&update)?;
            let updated: User = request(session, Method::PATCH, &endpoints::admin_user(&user_id), Some(&body)).await?;
            println!("{}", user_line(&updated));
            Ok(())
        }
        UsersSubcommand::Delete { user_id } => {
            let _: Value = request(session, Method::DELETE, &endpoints::user(&user_id), None).await?;
            println!("deleted user {user_id}");
            Ok(())
        }
    }
}

async fn run_policies(session: &Session, command: PoliciesSubcommand) -> Result<(), CliError> {
    match command {
        PoliciesSubcommand::List => {
            let policies: Vec<ExpensePolicy> = request(session, Method::GET, endpoints::POLICIES, None).await?;
            for policy in &policies {
                println!("{}", policy_line(policy));
            }
            Ok(())
        }
        PoliciesSubcommand::Create(args) => {
            let body = serde_json::to_value(args.into_policy()?)?;
            let created: Value = request(session, Method::POST, endpoints::POLICIES, Some(&body)).await?;
            print_json(&created)
        }
        PoliciesSubcommand::Update { policy_id, policy } => {
            let body = serde_json::to_value(policy.into_policy()?)?;
            let updated: Value = request(session, Method::PUT, &endpoints::policy(&policy_id), Some(&body)).await?;
            print_json(&updated)
        }
        PoliciesSubcommand::Delete { policy_id } => {
            let _: Value = request(session, Method::DELETE, &endpoints::policy(&policy_id), None).await?;
            println!("deleted policy {policy_id}");
            Ok(())
        }
    }
}

async fn run_reports(session: &Session, command: ReportsSubcommand) -> Result<(), CliError> {
    match command {
        ReportsSubcommand::List => {
            let reports: Vec<ExpenseReport> = request(session, Method::GET, endpoints::REPORTS, None).await?;
            for report in &reports {
                println!(
                    "{:<38} {:<24} {:>12}  {}",
                    report.id.as_deref().unwrap_or("-"),
                    report.title,
                    format_currency(report.total_amount, "USD"),
                    report.status.as_deref().unwrap_or("draft"),
                );
            }
            Ok(())
        }
        ReportsSubcommand::Create {
            title,
            description,
            expense_ids,
        } => {
            if title.trim().is_empty() {
                return Err(ValidationError::MissingField.into());
            }
            let report = ExpenseReport {
                id: None,
                title: title.trim().to_owned(),
                description,
                expense_ids,
                total_amount: 0.0,
                status: None,
            };
            let body = serde_json::to_value(&report)?;
            let created: Value = request(session, Method::POST, endpoints::REPORTS, Some(&body)).await?;
            print_json(&created)
        }
        ReportsSubcommand::Submit { report_id } => {
            let _: Value = request(session, Method::PUT, &endpoints::submit_report(&report_id), None).await?;
            println!("submitted report {report_id}");
            Ok(())
        }
    }
}

async fn run_notifications(session: &Session, command: NotificationsSubcommand) -> Result<(), CliError> {
    match command {
        NotificationsSubcommand::List { unread } => {
            let items: Vec<Notification> = request(session, Method::GET, endpoints::NOTIFICATIONS, None).await?;
            for item in items.iter().filter(|item| !unread || !item.read) {
                let marker = if item.read { ' ' } else { '*' };
                println!("{marker} {:<38} {}: {}", item.id, item.title, item.message);
            }
            Ok(())
        }
        NotificationsSubcommand::Read { notification_id } => {
            let path = endpoints::mark_notification_read(&notification_id);
            let _: Value = request(session, Method::PUT, &path, None).await?;
            println!("marked {notification_id} as read");
            Ok(())
        }
    }
}

/// Authenticated request; a 401 also ends the stored session.
async fn request<T: DeserializeOwned>(
    session: &Session,
    method: Method,
    path: &str,
    body: Option<&Value>,
) -> Result<T, CliError> {
    let ticket = session.ticket(&ViewScope::new());
    match session.api().call(method, path, body).await {
        Ok(value) => Ok(value),
        Err(err) => {
            session.handle_rejection(&ticket, &err);
            Err(err.into())
        }
    }
}

fn print_expenses(all: &[Expense], args: &ListArgs, team: bool) -> Result<(), CliError> {
    let (key, order) = args.order()?;
    let visible = apply(all, &args.filter(OffsetDateTime::now_utc()), key, order);
    if args.json {
        return print_json(&serde_json::to_value(&visible)?);
    }
    if args.csv {
        print!("{}", expenses_csv(&visible)?);
        return Ok(());
    }
    for expense in &visible {
        println!("{}", expense_line(expense, team));
    }
    let stats = TeamStats::from_expenses(&visible);
    println!(
        "{} expenses, {} total, {} pending, {} approved",
        stats.total,
        format_currency(stats.total_amount, "USD"),
        stats.pending,
        stats.approved
    );
    Ok(())
}

fn expense_line(expense: &Expense, with_employee: bool) -> String {
    let mut line = format!(
        "{:<38} {:<12} {:>12} {:<10} {:<14}",
        expense.id,
        format_date(&expense.date),
        format_currency(expense.amount, &expense.currency),
        status_label(expense.status),
        expense.category,
    );
    if with_employee {
        line.push_str(&format!(" {:<20}", expense.employee_name.as_deref().unwrap_or(&expense.employee_id)));
    }
    line.push(' ');
    line.push_str(&expense.description);
    if expense.policy_violation {
        line.push_str(" [policy]");
    }
    line.trim_end().to_owned()
}

fn user_line(user: &User) -> String {
    let state = if user.is_active { "active" } else { "inactive" };
    format!("{:<38} {:<24} {:<32} {:<9} {state}", user.id, user.full_name, user.email, user.role.as_str())
}

fn user_summary(user: &User) -> Vec<String> {
    let mut lines = vec![
        format!("{} <{}>", user.full_name, user.email),
        format!("role: {}", user.role.label()),
        format!("company: {}", user.company_id),
    ];
    if let Some(title) = &user.job_title {
        lines.push(format!("title: {title}"));
    }
    if let Some(department) = &user.department {
        lines.push(format!("department: {department}"));
    }
    lines
}

fn stats_lines(stats: &DashboardStats) -> Vec<String> {
    let mut lines = vec![
        format!("total expenses: {}", stats.total_expenses),
        format!("pending: {}", stats.pending_expenses),
        format!("approved: {}", stats.approved_expenses),
    ];
    if let Some(amount) = stats.total_amount {
        lines.push(format!("total amount: {}", format_currency(amount, "USD")));
    }
    if let Some(users) = stats.total_users {
        lines.push(format!("users: {users}"));
    }
    lines
}

fn policy_line(policy: &ExpensePolicy) -> String {
    let receipt = if policy.requires_receipt { "receipt" } else { "no receipt" };
    let auto = policy
        .auto_approve_limit
        .map_or_else(|| "manual".to_owned(), |limit| format!("auto <= {}", format_currency(limit, "USD")));
    format!(
        "{:<38} {:<14} max {:>12}  {receipt}, {auto}",
        policy.id.as_deref().unwrap_or("-"),
        policy.category,
        format_currency(policy.max_amount, "USD"),
    )
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
