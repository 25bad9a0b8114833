//! Declarative slot schemas
//!
//! A schema is data: the slots a composite type is expected to have and the
//! weighted rules that recognise each one. Schemas are parsed from JSON and
//! validated once, before any classification runs.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::node::LayoutMode;
use crate::types::ComponentType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotSchema {
    /// Schema identifier reported in mapping results (`card`, `dialog`, ...)
    pub name: String,
    pub component: ComponentType,
    pub slots: Vec<SlotSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotSpec {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub allows_multiple: bool,
    pub rules: Vec<DetectionRule>,
    /// Slots searched inside the node matched by this one
    #[serde(default)]
    pub child_slots: Vec<SlotSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRule {
    #[serde(flatten)]
    pub kind: RuleKind,
    pub weight: f64,
}

/// Rule predicates. Each evaluates a candidate child to a value in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleKind {
    /// Candidate name matches a keyword (exact 1.0, fuzzy 0.7)
    NameKeyword { keywords: Vec<String> },
    /// Ordinal position among visible siblings
    Position { at: SlotPosition },
    IsText,
    IsContainer,
    /// Relative font size among text siblings
    TextRole { role: TextRole },
    /// Candidate itself classifies as one of these types
    Component { types: Vec<ComponentType> },
    /// A child or grandchild of the candidate classifies as one of these types
    ContainsComponent { types: Vec<ComponentType> },
    HasChildren { min: usize },
    Layout { axis: LayoutMode },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotPosition {
    First,
    Second,
    Middle,
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    Heading,
    Body,
}

impl RuleKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::NameKeyword { .. } => "name_keyword",
            Self::Position { .. } => "position",
            Self::IsText => "is_text",
            Self::IsContainer => "is_container",
            Self::TextRole { .. } => "text_role",
            Self::Component { .. } => "component",
            Self::ContainsComponent { .. } => "contains_component",
            Self::HasChildren { .. } => "has_children",
            Self::Layout { .. } => "layout",
        }
    }
}

impl SlotSpec {
    /// First keyword of the first name rule, used in renaming suggestions
    pub fn primary_keyword(&self) -> Option<&str> {
        self.rules.iter().find_map(|r| match &r.kind {
            RuleKind::NameKeyword { keywords } => keywords.first().map(String::as_str),
            _ => None,
        })
    }

    pub fn is_container(&self) -> bool {
        !self.child_slots.is_empty()
    }
}

impl SlotSchema {
    /// Reject structurally broken schemas before they are used.
    pub fn validate(&self, max_depth: usize) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(EngineError::schema(self.component.as_str(), "schema name is empty"));
        }
        if self.slots.is_empty() {
            return Err(EngineError::schema(&self.name, "schema declares no slots"));
        }
        let mut seen = AHashSet::new();
        self.validate_slots(&self.slots, 1, max_depth, &mut seen)
    }

    fn validate_slots<'s>(
        &self,
        slots: &'s [SlotSpec],
        depth: usize,
        max_depth: usize,
        seen: &mut AHashSet<&'s str>,
    ) -> Result<()> {
        if !slots.is_empty() && depth > max_depth {
            return Err(EngineError::schema(
                &self.name,
                format!("child_slots nest deeper than {max_depth} levels"),
            ));
        }
        for slot in slots {
            let name = slot.name.trim();
            if name.is_empty() {
                return Err(EngineError::schema(&self.name, "slot name is empty"));
            }
            if !seen.insert(slot.name.as_str()) {
                return Err(EngineError::schema(&self.name, format!("duplicate slot '{name}'")));
            }
            if slot.rules.is_empty() {
                return Err(EngineError::schema(&self.name, format!("slot '{name}' has no detection rules")));
            }
            for rule in &slot.rules {
                self.validate_rule(name, rule)?;
            }
            self.validate_slots(&slot.child_slots, depth + 1, max_depth, seen)?;
        }
        Ok(())
    }

    fn validate_rule(&self, slot: &str, rule: &DetectionRule) -> Result<()> {
        let label = rule.kind.label();
        if !rule.weight.is_finite() || rule.weight < 0.0 {
            return Err(EngineError::schema(
                &self.name,
                format!("slot '{slot}' rule {label} has invalid weight {}", rule.weight),
            ));
        }
        let empty = match &rule.kind {
            RuleKind::NameKeyword { keywords } => keywords.iter().all(|k| k.trim().is_empty()),
            RuleKind::Component { types } | RuleKind::ContainsComponent { types } => types.is_empty(),
            _ => false,
        };
        if empty {
            return Err(EngineError::schema(&self.name, format!("slot '{slot}' rule {label} has an empty list")));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> SlotSchema {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_rules() {
        let schema = parse(
            r#"{
                "name": "card",
                "component": "card",
                "slots": [{
                    "name": "CardHeader",
                    "required": true,
                    "rules": [
                        {"kind": "name_keyword", "keywords": ["header"], "weight": 0.6},
                        {"kind": "position", "at": "first", "weight": 0.35},
                        {"kind": "is_container", "weight": 0.2}
                    ],
                    "child_slots": [{
                        "name": "CardTitle",
                        "rules": [{"kind": "text_role", "role": "heading", "weight": 0.2}]
                    }]
                }]
            }"#,
        );
        let header = &schema.slots[0];
        assert!(header.required && !header.allows_multiple);
        assert_eq!(header.rules[1].kind, RuleKind::Position { at: SlotPosition::First });
        assert_eq!(header.rules[2].kind, RuleKind::IsContainer);
        assert_eq!(header.primary_keyword(), Some("header"));
        assert!(header.is_container());
        assert!(schema.validate(12).is_ok());
    }

    #[test]
    fn test_unknown_rule_kind_is_rejected() {
        let res: std::result::Result<SlotSchema, _> = serde_json::from_str(
            r#"{"name": "x", "component": "card", "slots": [
                {"name": "A", "rules": [{"kind": "color_match", "weight": 0.5}]}
            ]}"#,
        );
        assert!(res.is_err());
    }

    fn one_rule(weight: f64) -> SlotSchema {
        SlotSchema {
            name: "card".into(),
            component: ComponentType::Card,
            slots: vec![SlotSpec {
                name: "CardHeader".into(),
                required: true,
                allows_multiple: false,
                rules: vec![DetectionRule { kind: RuleKind::IsText, weight }],
                child_slots: vec![],
            }],
        }
    }

    #[test]
    fn test_bad_weights_are_rejected() {
        assert!(one_rule(0.5).validate(12).is_ok());
        for w in [-0.1, f64::NAN, f64::INFINITY] {
            let err = one_rule(w).validate(12).unwrap_err();
            assert!(matches!(err, EngineError::InvalidSchema { .. }), "{w}");
        }
    }

    #[test]
    fn test_duplicate_and_empty_names_are_rejected() {
        let mut schema = one_rule(0.5);
        schema.slots.push(schema.slots[0].clone());
        assert!(schema.validate(12).unwrap_err().to_string().contains("duplicate slot"));

        let mut schema = one_rule(0.5);
        schema.slots[0].name = " ".into();
        assert!(schema.validate(12).is_err());
    }

    #[test]
    fn test_empty_keyword_list_is_rejected() {
        let mut schema = one_rule(0.5);
        schema.slots[0].rules[0].kind = RuleKind::NameKeyword { keywords: vec![] };
        assert!(schema.validate(12).unwrap_err().to_string().contains("empty list"));
    }

    #[test]
    fn test_nesting_limit() {
        let mut schema = one_rule(0.5);
        let mut inner = schema.slots[0].clone();
        inner.name = "Inner".into();
        schema.slots[0].child_slots.push(inner);
        assert!(schema.validate(2).is_ok());
        assert!(schema.validate(1).is_err());
    }
}
