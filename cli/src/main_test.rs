use super::*;

use time::macros::datetime;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["expense-cli", "--token-file", "/tmp/expense-cli-test-token"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).expect("parse")
}

fn expense() -> Expense {
    Expense {
        id: "exp-1".to_owned(),
        employee_id: "emp-7".to_owned(),
        employee_name: Some("Dana Reyes".to_owned()),
        amount: 1234.5,
        currency: "USD".to_owned(),
        category: "travel".to_owned(),
        description: "Flight to Denver".to_owned(),
        date: "2025-01-05".to_owned(),
        status: ExpenseStatus::Pending,
        merchant_name: None,
        policy_violation: false,
        violation_reason: None,
        created_at: None,
    }
}

#[test]
fn login_reads_credentials_from_flags() {
    let cli = parse(&["login", "--email", "a@b.co", "--password", "pw"]);
    match cli.command {
        Command::Login { email, password } => {
            assert_eq!(email, "a@b.co");
            assert_eq!(password, "pw");
        }
        other => panic!("unexpected command: {other:?}"),
    }
    assert_eq!(cli.base_url, "http://127.0.0.1:8001/api");
}

#[test]
fn list_args_parse_status_range_and_sort() {
    let cli = parse(&["expenses", "list", "--status", "approved", "--range", "month", "--sort", "amount-asc"]);
    let Command::Expenses(ExpensesCommand {
        command: ExpensesSubcommand::List(args),
    }) = cli.command
    else {
        panic!("expected expenses list");
    };
    assert_eq!(args.status, Some(ExpenseStatus::Approved));
    assert_eq!(args.range, DateRange::Month);
    assert_eq!(args.order().expect("sort"), (SortKey::Amount, SortOrder::Asc));
}

#[test]
fn unknown_role_is_rejected_by_the_parser() {
    let err = Cli::try_parse_from(["expense-cli", "users", "update", "u-1", "--role", "owner"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
}

#[test]
fn public_commands_need_no_session() {
    assert_eq!(parse(&["logout"]).command.required_roles(), None);
    assert_eq!(parse(&["login", "--email", "a@b.co", "--password", "pw"]).command.required_roles(), None);
}

#[test]
fn commands_inherit_route_roles() {
    let roles = |args: &[&str]| parse(args).command.required_roles().expect("gated");
    assert_eq!(roles(&["expenses", "list"]), Route::Expenses.required_roles());
    assert_eq!(roles(&["expenses", "pending"]), APPROVERS);
    assert_eq!(roles(&["team", "members"]), Route::TeamExpenses.required_roles());
    assert_eq!(roles(&["users", "list"]), ADMINS);
    assert_eq!(roles(&["policies", "list"]), EVERYONE);
    assert_eq!(roles(&["policies", "delete", "p-1"]), ADMINS);
    assert_eq!(roles(&["whoami"]), EVERYONE);
}

#[test]
fn employee_cannot_run_approvals() {
    let command = parse(&["expenses", "approve", "exp-1", "--reject"]).command;
    let required = command.required_roles().expect("gated");
    assert!(!can_access(Some(Role::Employee), required));
    assert!(can_access(Some(Role::Manager), required));
    assert_eq!(command.name(), "expenses");
}

#[test]
fn expense_line_shows_employee_only_for_team_views() {
    let mine = expense_line(&expense(), false);
    assert!(mine.starts_with("exp-1"));
    assert!(mine.contains("$1,234.50"));
    assert!(mine.ends_with("Flight to Denver"));
    assert!(!mine.contains("Dana Reyes"));

    let mut flagged = expense();
    flagged.policy_violation = true;
    let team = expense_line(&flagged, true);
    assert!(team.contains("Dana Reyes"));
    assert!(team.ends_with("[policy]"));
}

#[test]
fn api_errors_read_as_next_steps() {
    let expired = ApiError::Unauthorized { detail: None };
    assert_eq!(describe_api_error(&expired), "session expired; run `expense-cli login` again");
    let conflict = ApiError::from_response(400, r#"{"detail":"Email already registered"}"#);
    assert_eq!(describe_api_error(&conflict), "backend returned 400: Email already registered");
    assert_eq!(CliError::from(conflict).to_string(), "backend returned 400: Email already registered");
}

#[test]
fn list_filter_applies_range_cutoff() {
    let cli = parse(&["team", "expenses", "--range", "week", "--search", "flight"]);
    let Command::Team(TeamCommand {
        command: TeamSubcommand::Expenses(args),
    }) = cli.command
    else {
        panic!("expected team expenses");
    };
    let filter = args.filter(datetime!(2025-03-31 10:00:00 UTC));
    assert_eq!(filter.search, "flight");
    assert_eq!(filter.since, Some(datetime!(2025-03-24 10:00:00 UTC)));
}

#[test]
fn policy_amount_must_be_positive() {
    let args = PolicyArgs {
        category: "meals".to_owned(),
        max_amount: 0.0,
        requires_receipt: true,
        auto_approve_limit: None,
    };
    assert!(matches!(args.into_policy(), Err(CliError::InvalidArgument { field: "max-amount", .. })));
}

#[test]
fn csv_and_json_output_are_exclusive() {
    let cli = parse(&["team", "expenses", "--csv"]);
    let Command::Team(TeamCommand {
        command: TeamSubcommand::Expenses(args),
    }) = cli.command
    else {
        panic!("expected team expenses");
    };
    assert!(args.csv && !args.json);

    let err = Cli::try_parse_from(["expense-cli", "expenses", "list", "--csv", "--json"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
}

#[test]
fn csv_listing_keeps_the_filtered_order() {
    let mut second = expense();
    second.id = "exp-2".to_owned();
    second.description = "Hotel, two nights".to_owned();
    second.date = "2025-01-09".to_owned();
    let visible = apply(&[expense(), second], &ExpenseFilter::default(), SortKey::Date, SortOrder::Desc);
    let csv = expenses_csv(&visible).expect("csv");
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Date,Employee,Description,Category,Amount,Status");
    assert_eq!(lines[1], "2025-01-09,Dana Reyes,\"Hotel, two nights\",travel,1234.50,Pending");
    assert_eq!(lines[2], "2025-01-05,Dana Reyes,Flight to Denver,travel,1234.50,Pending");
}

#[test]
fn new_user_password_can_be_generated() {
    let cli = parse(&["users", "create", "--full-name", "Ann", "--email", "ann@acme.test", "--generate-password"]);
    let Command::Users(UsersCommand {
        command: UsersSubcommand::Create {
            password,
            generate_password,
            ..
        },
    }) = cli.command
    else {
        panic!("expected users create");
    };
    assert_eq!(password, None);
    assert!(generate_password);

    let missing = Cli::try_parse_from(["expense-cli", "users", "create", "--full-name", "Ann", "--email", "a@b.co"]);
    if std::env::var_os("EXPENSE_NEW_USER_PASSWORD").is_none() {
        assert_eq!(missing.unwrap_err().kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}

#[test]
fn own_profile_is_open_to_everyone_but_others_need_admin() {
    let own = parse(&["profile", "--job-title", "Analyst"]).command;
    assert_eq!(own.required_roles(), Some(EVERYONE));
    assert_eq!(own.name(), "profile");

    let other = parse(&["profile", "--user", "u-9", "--department", "Sales"]).command;
    assert_eq!(other.required_roles(), Some(ADMINS));
    let Command::Profile(args) = other else {
        panic!("expected profile");
    };
    let (target, update) = args.into_update().expect("update");
    assert_eq!(target.as_deref(), Some("u-9"));
    assert_eq!(update.department.as_deref(), Some("Sales"));
    assert_eq!(update.full_name, None);
}

#[test]
fn empty_profile_edit_is_rejected() {
    let Command::Profile(args) = parse(&["profile", "--phone", "  "]).command else {
        panic!("expected profile");
    };
    assert!(matches!(args.into_update(), Err(CliError::InvalidArgument { field: "profile", .. })));
}

/// Serve one canned `(status, body)` per incoming connection, in order.
async fn canned_backend(responses: Vec<(u16, &'static str)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().await.expect("accept");
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|window| window == b"\r\n\r\n") {
                let read = stream.read(&mut buf).await.expect("read");
                if read == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..read]);
            }
            let reply = format!(
                "HTTP/1.1 {status} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(reply.as_bytes()).await.expect("write");
            let _ = stream.shutdown().await;
        }
    });
    format!("http://{addr}/api")
}

#[tokio::test]
async fn rejected_request_removes_the_token_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let token_path = dir.path().join("token");
    std::fs::write(&token_path, "stored-token").expect("seed token");
    let me = r#"{"id":"u-1","email":"a@b.co","full_name":"Ann","role":"manager","company_id":"c-1"}"#;
    let base = canned_backend(vec![(200, me), (401, r#"{"detail":"Could not validate credentials"}"#)]).await;
    let session: Session = SessionStore::new(
        HttpApi::new(base),
        FileCredentialStore::new(token_path.clone()),
        ConsoleListener,
    );

    assert_eq!(session.restore().await, GateState::Authenticated(Role::Manager));
    let err = request::<Value>(&session, Method::GET, endpoints::EXPENSES, None)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "session expired; run `expense-cli login` again");
    assert!(!token_path.exists());
    assert_eq!(session.snapshot().user(), None);
}
