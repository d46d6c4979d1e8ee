use crate::core::{PregnancyStatus, RiskLevel};
use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeVariant {
    Default,
    Success,
    Warning,
    Danger,
    Info,
}

impl BadgeVariant {
    fn class(&self) -> &'static str {
        match self {
            BadgeVariant::Default => "bg-gray-100 text-gray-700",
            BadgeVariant::Success => "bg-green-100 text-green-700",
            BadgeVariant::Warning => "bg-yellow-100 text-yellow-800",
            BadgeVariant::Danger => "bg-red-100 text-red-700",
            BadgeVariant::Info => "bg-blue-100 text-blue-700",
        }
    }
}

impl From<RiskLevel> for BadgeVariant {
    fn from(risk: RiskLevel) -> Self {
        match risk {
            RiskLevel::Low => BadgeVariant::Success,
            RiskLevel::Medium => BadgeVariant::Warning,
            RiskLevel::High => BadgeVariant::Danger,
        }
    }
}

impl From<PregnancyStatus> for BadgeVariant {
    fn from(status: PregnancyStatus) -> Self {
        match status {
            PregnancyStatus::Ongoing => BadgeVariant::Info,
            PregnancyStatus::Completed => BadgeVariant::Success,
            PregnancyStatus::Miscarriage | PregnancyStatus::Abortion => BadgeVariant::Default,
        }
    }
}

/// Pill-shaped label
#[component]
pub fn Badge(
    #[prop(default = BadgeVariant::Default)]
    variant: BadgeVariant,
    children: Children,
) -> impl IntoView {
    view! {
        <span class=format!("inline-flex items-center px-2.5 py-0.5 rounded-full text-xs font-medium {}", variant.class())>
            {children()}
        </span>
    }
}

#[component]
pub fn RiskBadge(risk: RiskLevel) -> impl IntoView {
    view! { <Badge variant=risk.into()>{risk.label()}</Badge> }
}

#[component]
pub fn StatusBadge(status: PregnancyStatus) -> impl IntoView {
    view! { <Badge variant=status.into()>{status.label()}</Badge> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_variants() {
        assert_eq!(BadgeVariant::from(RiskLevel::High), BadgeVariant::Danger);
        assert_eq!(BadgeVariant::from(RiskLevel::Low), BadgeVariant::Success);
    }
}
