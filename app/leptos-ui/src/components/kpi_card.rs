use leptos::prelude::*;

#[component]
pub fn KpiCard(
    label: &'static str,
    value: String,
    #[prop(default = "")]
    hint: &'static str,
    #[prop(default = false)]
    loading: bool,
) -> impl IntoView {
    view! {
        <div class="kpi-card" class:loading=loading title=hint>
            <div class="value">{value}</div>
            <div class="label">{label}</div>
        </div>
    }
}
