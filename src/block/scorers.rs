//! Built-in block scorers
//!
//! Each scorer reads the [`BlockContext`] and nothing else. Weights are
//! additive evidence on a [`ScoreSheet`]; requirements a category cannot
//! do without are vetoes.

use crate::layout::{Complexity, LayoutKind};
use crate::scoring::ScoreSheet;
use crate::types::ComponentType as T;

use super::context::BlockContext;
use super::{BlockCategory, BlockScore, BlockScorer};

fn finish(category: BlockCategory, sub_type: &'static str, sheet: ScoreSheet) -> BlockScore {
    let (confidence, reasons) = sheet.into_parts();
    BlockScore {
        category,
        sub_type,
        confidence,
        reasons,
    }
}

const AUTH_NAMES: &[&str] = &[
    "login",
    "log in",
    "sign in",
    "signin",
    "sign up",
    "signup",
    "register",
    "auth",
    "authentication",
    "forgot password",
    "reset password",
];
const AUTH_WORDS: &[&str] = &[
    "password",
    "sign in",
    "log in",
    "login",
    "sign up",
    "signup",
    "forgot",
    "remember me",
    "create account",
    "register",
];
const SIGNUP_WORDS: &[&str] = &["sign up", "signup", "register", "create account"];
const RESET_WORDS: &[&str] = &["forgot", "reset password"];

pub struct AuthenticationScorer;

impl BlockScorer for AuthenticationScorer {
    fn category(&self) -> BlockCategory {
        BlockCategory::Authentication
    }

    fn score(&self, ctx: &BlockContext) -> BlockScore {
        let c = &ctx.characteristics;
        let mut sheet = ScoreSheet::new();
        if c.input_count == 0 || c.button_count == 0 {
            sheet.veto("needs at least one input and one button");
            return finish(self.category(), "login", sheet);
        }
        sheet.add(0.3, "inputs with a submit control");
        let named = ctx.named(AUTH_NAMES);
        let worded = ctx.mentions(AUTH_WORDS);
        if named {
            sheet.add(0.35, "authentication layer name");
        }
        if worded {
            sheet.add(0.25, "authentication wording");
        }
        if c.input_count >= 2 {
            sheet.add(0.05, "credential pair");
        }
        if !named && !worded {
            sheet.cap(0.3, "no authentication cue");
        }

        let sub_type = if ctx.mentions(RESET_WORDS) {
            "forgot-password"
        } else if ctx.mentions(SIGNUP_WORDS) {
            "signup"
        } else {
            "login"
        };
        finish(self.category(), sub_type, sheet)
    }
}

pub struct FormScorer;

impl BlockScorer for FormScorer {
    fn category(&self) -> BlockCategory {
        BlockCategory::Form
    }

    fn score(&self, ctx: &BlockContext) -> BlockScore {
        let c = &ctx.characteristics;
        let mut sheet = ScoreSheet::new();
        if c.input_count == 0 {
            sheet.veto("no input controls");
            return finish(self.category(), "generic", sheet);
        }
        sheet.add(0.25, "collects input");
        if c.input_count >= 2 {
            sheet.add(0.15, "several fields");
        }
        if c.button_count > 0 {
            sheet.add(0.1, "submit control");
        }
        if ctx.named(&["form", "contact", "newsletter", "subscribe", "checkout", "survey", "feedback", "settings"]) {
            sheet.add(0.3, "form layer name");
        }
        if ctx.has(T::Form) {
            sheet.add(0.1, "contains a form component");
        }
        if ctx.layout_kind() == LayoutKind::Column {
            sheet.add(0.05, "stacked fields");
        }

        let sub_type = if ctx.mentions(&["checkout", "payment", "card number", "billing"]) {
            "checkout"
        } else if ctx.mentions(&["newsletter", "subscribe"]) {
            "newsletter"
        } else if ctx.mentions(&["contact", "message"]) {
            "contact"
        } else if ctx.mentions(&["settings", "preferences", "profile"]) {
            "settings"
        } else {
            "generic"
        };
        finish(self.category(), sub_type, sheet)
    }
}

pub struct NavigationScorer;

impl BlockScorer for NavigationScorer {
    fn category(&self) -> BlockCategory {
        BlockCategory::Navigation
    }

    fn score(&self, ctx: &BlockContext) -> BlockScore {
        let c = &ctx.characteristics;
        let mut sheet = ScoreSheet::new();
        if ctx.named(&["navbar", "nav", "navigation", "header", "menu", "top bar", "app bar", "sidebar"]) {
            sheet.add(0.4, "navigation layer name");
        }
        let nav_components = [T::NavigationMenu, T::Menubar, T::Breadcrumb, T::Sidebar, T::Tabs];
        if nav_components.iter().any(|t| ctx.has(*t)) {
            sheet.add(0.3, "contains navigation components");
        }
        if ctx.layout_kind() == LayoutKind::Row && c.text_count >= 3 && c.heading_count == 0 {
            sheet.add(0.15, "row of short items");
        }
        if c.link_count >= 3 {
            sheet.add(0.15, "several links");
        }
        if ctx.facts.aspect_ratio.is_some_and(|r| r >= 6.0) {
            sheet.add(0.1, "wide strip");
        }
        if ctx.facts.height > 0.0 && ctx.facts.height <= 120.0 {
            sheet.add(0.05, "short bar");
        }
        if c.input_count > 1 {
            sheet.penalize(0.2, "collects several inputs");
        }

        let sub_type = if ctx.has(T::Sidebar) || ctx.facts.aspect_ratio.is_some_and(|r| r < 0.5) {
            "sidebar"
        } else if ctx.has(T::Breadcrumb) {
            "breadcrumb"
        } else {
            "navbar"
        };
        finish(self.category(), sub_type, sheet)
    }
}

pub struct FooterScorer;

impl BlockScorer for FooterScorer {
    fn category(&self) -> BlockCategory {
        BlockCategory::Footer
    }

    fn score(&self, ctx: &BlockContext) -> BlockScore {
        let c = &ctx.characteristics;
        let mut sheet = ScoreSheet::new();
        if ctx.named(&["footer", "site footer", "bottom bar"]) {
            sheet.add(0.45, "footer layer name");
        }
        if ctx.mentions(&["copyright", "all rights reserved", "rights reserved", "privacy", "terms"]) {
            sheet.add(0.25, "legal text");
        }
        if c.text_count >= 6 {
            sheet.add(0.1, "many short texts");
        }
        if matches!(ctx.layout_kind(), LayoutKind::Row | LayoutKind::Grid) && ctx.columns() >= 3 {
            sheet.add(0.1, "link columns");
        }

        let sub_type = if ctx.complexity() == Complexity::Simple {
            "simple"
        } else {
            "multi-column"
        };
        finish(self.category(), sub_type, sheet)
    }
}

pub struct PricingScorer;

impl BlockScorer for PricingScorer {
    fn category(&self) -> BlockCategory {
        BlockCategory::Pricing
    }

    fn score(&self, ctx: &BlockContext) -> BlockScore {
        let c = &ctx.characteristics;
        let mut sheet = ScoreSheet::new();
        if ctx.named(&["pricing", "prices", "plans", "plan", "tiers", "pricing table"]) {
            sheet.add(0.35, "pricing layer name");
        }
        if c.price_count >= 1 {
            sheet.add(0.3, "price text");
        }
        if c.price_count >= 2 {
            sheet.add(0.15, "several price points");
        }
        if ctx.mentions(&["per month", "monthly", "annually", "yearly", "billed", "free trial"]) {
            sheet.add(0.1, "billing wording");
        }
        if c.button_count >= 1 {
            sheet.add(0.05, "purchase control");
        }
        if c.card_count >= 2 {
            sheet.add(0.05, "plan cards");
        }

        let sub_type = if c.price_count >= 2 { "tiers" } else { "single-plan" };
        finish(self.category(), sub_type, sheet)
    }
}

pub struct FaqScorer;

impl BlockScorer for FaqScorer {
    fn category(&self) -> BlockCategory {
        BlockCategory::Faq
    }

    fn score(&self, ctx: &BlockContext) -> BlockScore {
        let c = &ctx.characteristics;
        let mut sheet = ScoreSheet::new();
        if ctx.named(&["faq", "faqs", "questions", "frequently asked", "help"]) {
            sheet.add(0.45, "faq layer name");
        }
        let folding = ctx.has(T::Accordion) || ctx.has(T::Collapsible);
        if folding {
            sheet.add(0.3, "collapsible answers");
        }
        if c.question_count >= 2 {
            sheet.add(0.25, "several questions");
        }

        let sub_type = if folding { "accordion" } else { "list" };
        finish(self.category(), sub_type, sheet)
    }
}

pub struct TestimonialsScorer;

impl BlockScorer for TestimonialsScorer {
    fn category(&self) -> BlockCategory {
        BlockCategory::Testimonials
    }

    fn score(&self, ctx: &BlockContext) -> BlockScore {
        let c = &ctx.characteristics;
        let mut sheet = ScoreSheet::new();
        if ctx.named(&["testimonial", "testimonials", "reviews", "quotes", "customers", "social proof"]) {
            sheet.add(0.45, "testimonial layer name");
        }
        if c.quote_count >= 1 {
            sheet.add(0.25, "quoted text");
        }
        if ctx.has(T::Avatar) {
            sheet.add(0.15, "author avatar");
        }
        if ctx.mentions(&["ceo", "founder", "review", "rating", "stars"]) {
            sheet.add(0.1, "attribution wording");
        }
        if c.card_count >= 2 {
            sheet.add(0.05, "repeated cards");
        }

        let sub_type = if ctx.has(T::Carousel) {
            "carousel"
        } else if c.card_count >= 2 {
            "grid"
        } else {
            "single"
        };
        finish(self.category(), sub_type, sheet)
    }
}

pub struct DashboardScorer;

impl BlockScorer for DashboardScorer {
    fn category(&self) -> BlockCategory {
        BlockCategory::Dashboard
    }

    fn score(&self, ctx: &BlockContext) -> BlockScore {
        let c = &ctx.characteristics;
        let mut sheet = ScoreSheet::new();
        if ctx.named(&["dashboard", "analytics", "overview", "admin", "report", "reports"]) {
            sheet.add(0.35, "dashboard layer name");
        }
        let charts = ctx.has(T::Chart);
        let tables = ctx.has(T::Table);
        if charts {
            sheet.add(0.25, "charts");
        }
        if tables {
            sheet.add(0.2, "data table");
        }
        if c.stat_count >= 2 {
            sheet.add(0.1, "numeric figures");
        }
        if ctx.has(T::Sidebar) {
            sheet.add(0.1, "app sidebar");
        }
        if ctx.complexity() == Complexity::Complex {
            sheet.add(0.05, "dense layout");
        }

        let sub_type = if charts {
            "analytics"
        } else if tables {
            "data-table"
        } else {
            "overview"
        };
        finish(self.category(), sub_type, sheet)
    }
}

pub struct StatsScorer;

impl BlockScorer for StatsScorer {
    fn category(&self) -> BlockCategory {
        BlockCategory::Stats
    }

    fn score(&self, ctx: &BlockContext) -> BlockScore {
        let c = &ctx.characteristics;
        let mut sheet = ScoreSheet::new();
        if ctx.named(&["stats", "statistics", "metrics", "numbers", "kpi", "kpis", "figures"]) {
            sheet.add(0.35, "stats layer name");
        }
        if c.stat_count >= 2 {
            sheet.add(0.3, "numeric figures");
        }
        if c.stat_count >= 3 {
            sheet.add(0.1, "row of figures");
        }
        if matches!(ctx.layout_kind(), LayoutKind::Row | LayoutKind::Grid) {
            sheet.add(0.1, "figures side by side");
        }
        if c.interactive_count == 0 {
            sheet.add(0.05, "read only");
        }

        let sub_type = if ctx.has(T::Card) { "cards" } else { "counters" };
        finish(self.category(), sub_type, sheet)
    }
}

pub struct FeaturesScorer;

impl BlockScorer for FeaturesScorer {
    fn category(&self) -> BlockCategory {
        BlockCategory::Features
    }

    fn score(&self, ctx: &BlockContext) -> BlockScore {
        let c = &ctx.characteristics;
        let mut sheet = ScoreSheet::new();
        if ctx.named(&["features", "feature", "benefits", "services", "capabilities", "how it works", "why"]) {
            sheet.add(0.35, "features layer name");
        }
        if c.card_count >= 3 || c.icon_count >= 3 || ctx.facts.repeated_children() >= 3 {
            sheet.add(0.25, "repeated items");
        }
        let kind = ctx.layout_kind();
        if kind == LayoutKind::Grid || (kind == LayoutKind::Row && ctx.columns() >= 3) {
            sheet.add(0.15, "items laid out in columns");
        }
        if c.heading_count >= 3 {
            sheet.add(0.1, "one heading per item");
        }
        if c.text_count >= 6 {
            sheet.add(0.05, "descriptive copy");
        }

        let sub_type = match kind {
            LayoutKind::Grid => "grid",
            LayoutKind::Column => "list",
            _ => "row",
        };
        finish(self.category(), sub_type, sheet)
    }
}

pub struct HeroScorer;

impl BlockScorer for HeroScorer {
    fn category(&self) -> BlockCategory {
        BlockCategory::Hero
    }

    fn score(&self, ctx: &BlockContext) -> BlockScore {
        let c = &ctx.characteristics;
        let mut sheet = ScoreSheet::new();
        if ctx.named(&["hero", "banner", "jumbotron", "masthead", "splash", "landing"]) {
            sheet.add(0.4, "hero layer name");
        }
        match c.max_font_size {
            Some(size) if size >= 40.0 => sheet.add(0.25, "display-size headline"),
            Some(size) if size >= 32.0 => sheet.add(0.15, "large headline"),
            _ => {}
        }
        if (1..=2).contains(&c.button_count) {
            sheet.add(0.1, "primary actions");
        }
        if c.image_count >= 1 {
            sheet.add(0.1, "hero image");
        }
        if c.heading_count >= 1 {
            sheet.add(0.05, "headline");
        }
        if ctx.complexity() != Complexity::Complex {
            sheet.add(0.05, "focused layout");
        }

        let sub_type = if c.image_count >= 1 { "with-image" } else { "centered" };
        finish(self.category(), sub_type, sheet)
    }
}

pub struct CtaScorer;

impl BlockScorer for CtaScorer {
    fn category(&self) -> BlockCategory {
        BlockCategory::Cta
    }

    fn score(&self, ctx: &BlockContext) -> BlockScore {
        let c = &ctx.characteristics;
        let mut sheet = ScoreSheet::new();
        if c.text_count == 0 || c.button_count == 0 {
            sheet.veto("needs text and a button");
            return finish(self.category(), "simple", sheet);
        }
        sheet.add(0.35, "text with a call to action");
        if c.heading_count >= 1 {
            sheet.add(0.1, "headline");
        }
        if ctx.named(&["cta", "call to action", "get started", "newsletter", "subscribe", "promo", "signup banner"]) {
            sheet.add(0.3, "cta layer name");
        }
        match ctx.complexity() {
            Complexity::Simple => sheet.add(0.1, "short and focused"),
            Complexity::Complex => sheet.penalize(0.1, "too busy for a single action"),
            Complexity::Moderate => {}
        }

        let sub_type = if c.input_count >= 1 { "newsletter" } else { "simple" };
        finish(self.category(), sub_type, sheet)
    }
}
