use crate::error::{GroupDimension, NameCollisionError};
use std::collections::HashMap;

/// Map a raw name onto `[A-Za-z0-9_]`, keeping case.
///
/// Every other character becomes `_`, and a leading digit gets a `_` prefix.
pub fn sanitize_group_name(name: &str) -> String {
    let mut sanitized: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if sanitized.starts_with(|c: char| c.is_ascii_digit()) {
        sanitized.insert(0, '_');
    }
    sanitized
}

#[derive(Debug)]
struct Claim {
    claimant: String,
    label: String,
}

/// Tracks who claimed each sanitized group name in one dimension.
#[derive(Debug)]
pub struct NameRegistry {
    dimension: GroupDimension,
    claimed: HashMap<String, Claim>,
}

impl NameRegistry {
    pub fn new(dimension: GroupDimension) -> Self {
        Self {
            dimension,
            claimed: HashMap::new(),
        }
    }

    /// Sanitize `raw` behind `prefix` and record the claim. The same raw name
    /// may claim a group again; a different one is a collision.
    pub fn claim(&mut self, prefix: &str, raw: &str) -> Result<String, NameCollisionError> {
        self.claim_as(prefix, raw, raw)
    }

    /// Like [`claim`](Self::claim), but the group belongs to `claimant`
    /// alone: any other claimant collides, even with an identical raw name.
    pub fn claim_as(
        &mut self,
        prefix: &str,
        raw: &str,
        claimant: &str,
    ) -> Result<String, NameCollisionError> {
        let group = format!("{}{}", prefix, sanitize_group_name(raw));
        let label = if raw == claimant {
            raw.to_string()
        } else {
            format!("{} (node {})", raw, claimant)
        };

        match self.claimed.get(&group) {
            Some(existing) if existing.claimant != claimant => Err(NameCollisionError {
                dimension: self.dimension,
                group,
                first: existing.label.clone(),
                second: label,
            }),
            Some(_) => Ok(group),
            None => {
                self.claimed.insert(
                    group.clone(),
                    Claim {
                        claimant: claimant.to_string(),
                        label,
                    },
                );
                Ok(group)
            }
        }
    }
}
