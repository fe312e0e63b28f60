pub mod create_deal_modal;
pub mod deal_card;
pub mod deal_detail;
pub mod kpi_card;
pub mod kpi_dashboard;
pub mod nav_bar;
pub mod seller_detail;
pub mod seller_wizard;
pub mod stage_column;
pub mod toast;
