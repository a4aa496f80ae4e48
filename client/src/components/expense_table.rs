//! Tabular expense listing shared by the personal and team views.

use access::format::{format_currency, format_date};
use access::types::Expense;
use leptos::prelude::*;

use crate::components::status_badge::StatusBadge;

#[component]
pub fn ExpenseTable(
    #[prop(into)] expenses: Signal<Vec<Expense>>,
    /// Adds an employee column for team listings.
    #[prop(optional)]
    show_employee: bool,
) -> impl IntoView {
    view! {
        <Show
            when=move || !expenses.with(Vec::is_empty)
            fallback=|| view! { <p class="empty">"No expenses match."</p> }
        >
            <table class="expense-table">
                <thead>
                    <tr>
                        <th>"Date"</th>
                        {show_employee.then(|| view! { <th>"Employee"</th> })}
                        <th>"Description"</th>
                        <th>"Category"</th>
                        <th class="expense-table__amount">"Amount"</th>
                        <th>"Status"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        expenses
                            .get()
                            .into_iter()
                            .map(|expense| {
                                let employee = expense.employee_name.clone().unwrap_or_default();
                                view! {
                                    <tr class:expense-table__row--flagged=expense.policy_violation>
                                        <td>{format_date(&expense.date)}</td>
                                        {show_employee.then(|| view! { <td>{employee}</td> })}
                                        <td>
                                            {expense.description.clone()}
                                            {expense
                                                .violation_reason
                                                .clone()
                                                .map(|reason| view! { <span class="expense-table__violation">{reason}</span> })}
                                        </td>
                                        <td>{expense.category.clone()}</td>
                                        <td class="expense-table__amount">
                                            {format_currency(expense.amount, &expense.currency)}
                                        </td>
                                        <td>
                                            <StatusBadge status=expense.status/>
                                        </td>
                                    </tr>
                                }
                            })
                            .collect_view()
                    }}
                </tbody>
            </table>
        </Show>
    }
}
