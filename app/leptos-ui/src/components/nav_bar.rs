use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppTab {
    #[default]
    Pipeline,
    Sellers,
}

impl AppTab {
    pub const ALL: [AppTab; 2] = [AppTab::Pipeline, AppTab::Sellers];

    pub fn label(&self) -> &'static str {
        match self {
            AppTab::Pipeline => "Deal Pipeline",
            AppTab::Sellers => "Sellers",
        }
    }

    /// Inline Lucide-style icon.
    fn icon(&self) -> &'static str {
        match self {
            // columns
            AppTab::Pipeline => r#"<svg xmlns="http://www.w3.org/2000/svg" width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><rect x="3" y="3" width="5" height="18" rx="1"/><rect x="10" y="3" width="5" height="12" rx="1"/><rect x="17" y="3" width="5" height="15" rx="1"/></svg>"#,
            // building
            AppTab::Sellers => r#"<svg xmlns="http://www.w3.org/2000/svg" width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><rect x="4" y="2" width="16" height="20" rx="2"/><line x1="9" y1="22" x2="9" y2="18"/><line x1="15" y1="22" x2="15" y2="18"/><line x1="8" y1="6" x2="8" y2="6"/><line x1="16" y1="6" x2="16" y2="6"/><line x1="8" y1="10" x2="8" y2="10"/><line x1="16" y1="10" x2="16" y2="10"/></svg>"#,
        }
    }
}

#[component]
pub fn NavBar(
    current_tab: ReadSignal<AppTab>,
    set_current_tab: WriteSignal<AppTab>,
    #[prop(into)] on_new_deal: Callback<()>,
) -> impl IntoView {
    view! {
        <nav class="sidebar">
            <div class="sidebar-brand">"Deal Room"</div>
            {AppTab::ALL.into_iter().map(|tab| view! {
                <button
                    class="sidebar-item"
                    class:active=move || current_tab.get() == tab
                    on:click=move |_| set_current_tab.set(tab)
                >
                    <span class="sidebar-item-icon" inner_html=tab.icon()></span>
                    <span class="sidebar-item-label">{tab.label()}</span>
                </button>
            }).collect_view()}
            <button class="sidebar-new-deal" on:click=move |_| on_new_deal.run(())>
                "+ New Deal"
            </button>
        </nav>
    }
}
