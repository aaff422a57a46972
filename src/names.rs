// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Names of the points exported to the registration layer.
//
//   <component>.pin.<i>.in / .out            float layout
//   <component>.pin.<i>.<type>-in / -out     typed layout
//   <component>.connected / .update-count / .error-count
//   <component>.update                       the periodic function

use std::collections::HashSet;

use crate::error::{BridgeError, BridgeResult};
use crate::pin::{EndpointKind, PinLayout, PinRegistry};

/// Longest name the registration layer accepts.
pub const NAME_MAX: usize = 47;

pub fn endpoint_name<L: PinLayout>(component: &str, pin: usize, kind: EndpointKind) -> String {
    format!("{component}.pin.{pin}.{}", L::endpoint_suffix(kind))
}

pub fn connected_name(component: &str) -> String {
    format!("{component}.connected")
}

pub fn update_count_name(component: &str) -> String {
    format!("{component}.update-count")
}

pub fn error_count_name(component: &str) -> String {
    format!("{component}.error-count")
}

pub fn update_function_name(component: &str) -> String {
    format!("{component}.update")
}

/// Every exported name for a registry, validated once at startup.
#[derive(Debug, Clone)]
pub struct NameTable {
    names: Vec<String>,
}

impl NameTable {
    /// Collect endpoint and status names; rejects over-long names and
    /// collisions.
    pub fn build<L: PinLayout>(component: &str, registry: &PinRegistry<L>) -> BridgeResult<Self> {
        if component.is_empty() {
            return Err(BridgeError::InvalidConfig("component name is empty".into()));
        }

        let mut names = Vec::new();
        for pin in 0..registry.pin_count() {
            names.extend(registry.active_kinds(pin).map(|k| endpoint_name::<L>(component, pin, k)));
        }
        names.push(connected_name(component));
        names.push(update_count_name(component));
        names.push(error_count_name(component));
        names.push(update_function_name(component));

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if name.len() > NAME_MAX {
                return Err(BridgeError::EndpointNameTooLong {
                    name: name.clone(),
                    max: NAME_MAX,
                });
            }
            if !seen.insert(name.as_str()) {
                return Err(BridgeError::NameCollision { name: name.clone() });
            }
        }
        Ok(Self { names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}
