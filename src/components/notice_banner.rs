//! Notice Banner Component

use leptos::prelude::*;
use log::Level;
use location_registry::NoticeKind;

use crate::context::use_app_context;

#[component]
pub fn NoticeBanner() -> impl IntoView {
    let ctx = use_app_context();

    let notice = Memo::new(move |_| ctx.state.with(|s| s.notice().cloned()));

    move || {
        notice.get().map(|notice| {
            let class = match notice.kind {
                NoticeKind::Validation => "notice notice-validation",
                NoticeKind::WriteFailed => "notice notice-error",
            };
            // Failed writes carry the logged errors behind them
            let details = match notice.kind {
                NoticeKind::WriteFailed => rolling_logger::recent_lines(Level::Warn),
                NoticeKind::Validation => Vec::new(),
            };
            view! {
                <div class=class role="alert">
                    <span>{notice.message}</span>
                    {(!details.is_empty()).then(|| view! {
                        <details class="notice-details">
                            <summary>"Detalhes"</summary>
                            <pre>{details.join("\n")}</pre>
                        </details>
                    })}
                    <button
                        class="notice-dismiss"
                        on:click=move |_| ctx.with_registry(|r| r.dismiss_notice())
                    >
                        "×"
                    </button>
                </div>
            }
        })
    }
}
