//! Approval queue for managers and admins.
//!
//! Lists `/expenses/pending` and posts approve/reject decisions with an
//! optional comment. A decided expense leaves the queue immediately.

#[cfg(test)]
#[path = "approvals_test.rs"]
mod approvals_test;

use access::format::{format_currency, format_date};
use access::types::{ApprovalAction, ApprovalRequest, Expense};
use access::{ApiError, Notice};
use leptos::prelude::*;

use crate::state::auth::{ClientSession, report_failure};
use crate::state::notices::{NoticeState, push_notice};
use crate::util::scope::{spawn_scoped, use_view_scope};

fn decision_message(action: ApprovalAction) -> &'static str {
    match action {
        ApprovalAction::Approve => "Expense approved",
        ApprovalAction::Reject => "Expense rejected",
    }
}

fn without(expenses: &mut Vec<Expense>, expense_id: &str) {
    expenses.retain(|expense| expense.id != expense_id);
}

/// Headline for the queue size.
fn queue_summary(expenses: &[Expense]) -> String {
    match expenses.len() {
        0 => "Nothing to review".to_owned(),
        1 => "1 expense awaiting review".to_owned(),
        n => format!("{n} expenses awaiting review"),
    }
}

#[component]
pub fn ApprovalsPage() -> impl IntoView {
    let session = expect_context::<ClientSession>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let scope = use_view_scope();

    let pending = RwSignal::new(Vec::<Expense>::new());
    let loading = RwSignal::new(true);
    let deciding = RwSignal::new(None::<String>);

    let on_loaded = move |result: Result<Vec<Expense>, ApiError>| {
        match result {
            Ok(list) => pending.set(list),
            Err(err) => report_failure(notices, &err, "Failed to load pending expenses"),
        }
        loading.set(false);
    };
    spawn_scoped(&session, &scope, |api| async move { api.pending_expenses().await }, on_loaded);

    let session = StoredValue::new(session);
    let scope = StoredValue::new(scope);
    let decide = move |expense_id: String, action: ApprovalAction, comment: String| {
        if deciding.get_untracked().is_some() {
            return;
        }
        deciding.set(Some(expense_id.clone()));
        let session = session.get_value();
        let request = ApprovalRequest::new(action, &comment);
        let on_done = {
            let expense_id = expense_id.clone();
            move |result: Result<(), ApiError>| {
                deciding.set(None);
                match result {
                    Ok(()) => {
                        pending.update(|list| without(list, &expense_id));
                        push_notice(notices, Notice::success(decision_message(action)));
                    }
                    Err(err) => report_failure(notices, &err, "Failed to record decision"),
                }
            }
        };
        spawn_scoped(
            &session,
            &scope.get_value(),
            move |api| async move { api.decide_expense(&expense_id, &request).await },
            on_done,
        );
    };

    view! {
        <div class="approvals-page">
            <p class="approvals-page__summary">{move || pending.with(|list| queue_summary(list))}</p>
            <Show when=move || !loading.get() fallback=|| view! { <div class="spinner"></div> }>
                <ul class="approval-list">
                    {move || {
                        pending
                            .get()
                            .into_iter()
                            .map(|expense| {
                                let comment = RwSignal::new(String::new());
                                let approve_id = expense.id.clone();
                                let reject_id = expense.id.clone();
                                let busy_id = expense.id.clone();
                                let busy = move || deciding.get().as_deref() == Some(busy_id.as_str());
                                view! {
                                    <li class="approval-card">
                                        <div class="approval-card__head">
                                            <span class="approval-card__employee">
                                                {expense.employee_name.clone().unwrap_or_default()}
                                            </span>
                                            <span class="approval-card__amount">
                                                {format_currency(expense.amount, &expense.currency)}
                                            </span>
                                        </div>
                                        <p class="approval-card__description">{expense.description.clone()}</p>
                                        <p class="approval-card__meta">
                                            {expense.category.clone()}
                                            " · "
                                            {format_date(&expense.date)}
                                        </p>
                                        {expense
                                            .violation_reason
                                            .clone()
                                            .map(|reason| view! { <p class="approval-card__violation">{reason}</p> })}
                                        <input
                                            class="approval-card__comment"
                                            type="text"
                                            placeholder="Comment (optional)"
                                            prop:value=move || comment.get()
                                            on:input=move |ev| comment.set(event_target_value(&ev))
                                        />
                                        <div class="approval-card__actions">
                                            <button
                                                class="btn btn--success"
                                                disabled=busy.clone()
                                                on:click=move |_| {
                                                    decide(approve_id.clone(), ApprovalAction::Approve, comment.get_untracked());
                                                }
                                            >
                                                "Approve"
                                            </button>
                                            <button
                                                class="btn btn--danger"
                                                disabled=busy
                                                on:click=move |_| {
                                                    decide(reject_id.clone(), ApprovalAction::Reject, comment.get_untracked());
                                                }
                                            >
                                                "Reject"
                                            </button>
                                        </div>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </div>
    }
}
