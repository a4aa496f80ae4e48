use super::*;

fn user_json(role: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "u-1",
        "email": "a@b.com",
        "full_name": "Ada Lovelace",
        "role": role,
        "company_id": "c-1",
        "created_at": "2025-01-05T10:00:00Z"
    })
}

#[test]
fn user_decodes_with_defaults_for_optional_fields() {
    let user: User = serde_json::from_value(user_json("manager")).unwrap();
    assert_eq!(user.role, Role::Manager);
    assert!(user.is_active);
    assert_eq!(user.manager_id, None);
}

#[test]
fn user_with_unknown_role_is_rejected() {
    assert!(serde_json::from_value::<User>(user_json("owner")).is_err());
}

#[test]
fn role_parses_case_insensitively() {
    assert_eq!(" Admin ".parse::<Role>(), Ok(Role::Admin));
    assert!("guest".parse::<Role>().is_err());
}

#[test]
fn auth_response_decodes_backend_shape() {
    let body = serde_json::json!({
        "access_token": "T",
        "token_type": "bearer",
        "user": user_json("employee"),
    });
    let parsed: AuthResponse = serde_json::from_value(body).unwrap();
    assert_eq!(parsed.access_token, "T");
    assert_eq!(parsed.user.role, Role::Employee);
}

#[test]
fn expense_status_tolerates_unknown_values() {
    let status: ExpenseStatus = serde_json::from_str("\"archived\"").unwrap();
    assert_eq!(status, ExpenseStatus::Unknown);
    assert_eq!("Approved".parse::<ExpenseStatus>(), Ok(ExpenseStatus::Approved));
}

#[test]
fn approval_request_drops_blank_comment() {
    let request = ApprovalRequest::new(ApprovalAction::Reject, "   ");
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        serde_json::json!({ "action": "reject" })
    );
    let request = ApprovalRequest::new(ApprovalAction::Approve, " ok ");
    assert_eq!(request.comment.as_deref(), Some("ok"));
}

#[test]
fn register_request_omits_missing_company() {
    let request = RegisterRequest {
        email: "a@b.com".to_owned(),
        password: "pw".to_owned(),
        full_name: "Ada".to_owned(),
        company_name: None,
        country: "US".to_owned(),
    };
    let value = serde_json::to_value(&request).unwrap();
    assert!(value.get("company_name").is_none());
}

#[test]
fn user_update_diff_only_includes_changes() {
    let user: User = serde_json::from_value(user_json("employee")).unwrap();
    let unchanged = UserUpdate::diff(&user, "Ada Lovelace", Role::Employee, true);
    assert!(unchanged.is_empty());

    let changed = UserUpdate::diff(&user, "Ada Lovelace", Role::Manager, false);
    assert_eq!(
        serde_json::to_value(&changed).unwrap(),
        serde_json::json!({ "role": "manager", "is_active": false })
    );
}

#[test]
fn dashboard_stats_accepts_both_variants() {
    let employee: DashboardStats = serde_json::from_value(serde_json::json!({
        "total_expenses": 3, "pending_expenses": 1, "approved_expenses": 2, "total_amount": 12.5
    }))
    .unwrap();
    assert_eq!(employee.total_amount, Some(12.5));
    assert_eq!(employee.total_users, None);

    let manager: DashboardStats = serde_json::from_value(serde_json::json!({
        "total_expenses": 9, "pending_expenses": 4, "approved_expenses": 5, "total_users": 7
    }))
    .unwrap();
    assert_eq!(manager.total_users, Some(7));
}

#[test]
fn profile_update_sends_only_non_blank_fields() {
    let update = ProfileUpdate {
        full_name: Some("  Ada King ".to_owned()),
        phone: Some("   ".to_owned()),
        job_title: Some("Analyst".to_owned()),
        ..ProfileUpdate::default()
    }
    .trimmed();
    assert_eq!(
        serde_json::to_value(&update).unwrap(),
        serde_json::json!({ "full_name": "Ada King", "job_title": "Analyst" })
    );
    assert!(ProfileUpdate { address: Some(String::new()), ..ProfileUpdate::default() }.trimmed().is_empty());
}
