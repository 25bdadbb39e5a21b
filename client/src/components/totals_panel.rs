//! Dashboard totals for the selected business.

#[cfg(test)]
#[path = "totals_panel_test.rs"]
mod totals_panel_test;

use leptos::prelude::*;

use crate::net::types::DashboardTotals;

/// Format an amount as `1,234.50 SAR`.
pub fn format_sar(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cents = cents as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if negative && cents > 0 { "-" } else { "" };
    format!("{sign}{grouped}.{:02} SAR", cents % 100)
}

#[component]
pub fn TotalsPanel(#[prop(into)] totals: Signal<DashboardTotals>) -> impl IntoView {
    view! {
        <section class="totals-panel">
            <div class="totals-panel__card">
                <span class="totals-panel__label">"Overdue customers"</span>
                <span class="totals-panel__value">{move || totals.get().overdue_customers}</span>
            </div>
            <div class="totals-panel__card">
                <span class="totals-panel__label">"Overdue"</span>
                <span class="totals-panel__value">{move || format_sar(totals.get().overdue_amount)}</span>
            </div>
            <div class="totals-panel__card">
                <span class="totals-panel__label">"Outstanding"</span>
                <span class="totals-panel__value">{move || format_sar(totals.get().outstanding_amount)}</span>
            </div>
            <div class="totals-panel__card">
                <span class="totals-panel__label">"Paid"</span>
                <span class="totals-panel__value">{move || format_sar(totals.get().paid_amount)}</span>
            </div>
        </section>
    }
}
