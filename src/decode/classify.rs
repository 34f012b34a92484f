//! Single-pass classification of a command stream.
//!
//! Each app registers the calls it understands as `(module?, function) -> kind`.
//! [`CallIndex::build`] walks the command stream once and groups every matching
//! call under its kind, keeping stream order. Priority is then decided in one
//! place by [`CallIndex::classify`].

use crate::decode::bcs::normalize_address;
use crate::error::{Error, Result};
use crate::tx::{MoveCall, TransactionData};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// The `(module, function)` a registered operation is detected by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallTarget {
    /// Required module name; `None` matches the function in any module.
    pub module: Option<&'static str>,
    pub function: &'static str,
}

impl CallTarget {
    /// Match on function name alone.
    pub const fn function(function: &'static str) -> Self {
        Self {
            module: None,
            function,
        }
    }

    /// Match on `module::function`.
    pub const fn qualified(module: &'static str, function: &'static str) -> Self {
        Self {
            module: Some(module),
            function,
        }
    }

    pub fn matches(&self, call: &MoveCall) -> bool {
        call.function == self.function && self.module.is_none_or(|m| call.module == m)
    }

    /// Display form, `module::function` or `*::function`.
    pub fn display(&self) -> String {
        format!("{}::{}", self.module.unwrap_or("*"), self.function)
    }
}

/// A registration table entry.
#[derive(Debug, Clone, Copy)]
pub struct Registration<K> {
    pub target: CallTarget,
    pub kind: K,
}

/// Allowlist of packages whose calls take part in decoding.
///
/// Empty means every package is accepted.
#[derive(Debug, Clone, Default)]
pub struct PackageFilter {
    packages: Vec<String>,
}

impl PackageFilter {
    /// Build from package ids. An id that is not a valid address is an error.
    pub fn new<I, S>(packages: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let packages = packages
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                normalize_address(p).ok_or_else(|| Error::InvalidPackageId(p.to_string()))
            })
            .collect::<Result<_>>()?;
        Ok(Self { packages })
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn allows(&self, package: &str) -> bool {
        if self.packages.is_empty() {
            return true;
        }
        normalize_address(package).is_some_and(|p| self.packages.contains(&p))
    }
}

/// Matching calls grouped by operation kind, in stream order.
#[derive(Debug)]
pub struct CallIndex<'a, K> {
    calls: BTreeMap<K, Vec<&'a MoveCall>>,
}

impl<'a, K: Copy + Ord + std::fmt::Debug> CallIndex<'a, K> {
    /// Scan the command stream once against `table`.
    ///
    /// A call matching several registrations is recorded under the first one.
    pub fn build(tx: &'a TransactionData, table: &[Registration<K>], filter: &PackageFilter) -> Self {
        let mut calls: BTreeMap<K, Vec<&'a MoveCall>> = BTreeMap::new();

        for call in tx.move_calls() {
            if !filter.allows(&call.package) {
                continue;
            }
            if let Some(reg) = table.iter().find(|r| r.target.matches(call)) {
                trace!(call = %call.target(), kind = ?reg.kind, "matched call");
                calls.entry(reg.kind).or_default().push(call);
            }
        }

        debug!(
            matched = ?calls.iter().map(|(k, v)| (*k, v.len())).collect::<Vec<_>>(),
            "indexed command stream"
        );
        Self { calls }
    }

    /// First kind in `priority` with at least one matching call.
    pub fn classify(&self, priority: &[K]) -> Option<K> {
        priority.iter().copied().find(|k| self.calls.contains_key(k))
    }

    /// First matching call of `kind`.
    pub fn first(&self, kind: K) -> Option<&'a MoveCall> {
        self.calls.get(&kind).and_then(|calls| calls.first().copied())
    }

    /// Every matching call of `kind`, in stream order.
    pub fn all(&self, kind: K) -> &[&'a MoveCall] {
        self.calls.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First matching call of `kind`, or `MalformedInput` naming `what`.
    pub fn require(&self, kind: K, what: &str) -> Result<&'a MoveCall> {
        self.first(kind)
            .ok_or_else(|| Error::MalformedInput(format!("missing {} call", what)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tx::Command;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum Kind {
        Open,
        Remove,
        Collect,
    }

    const TABLE: &[Registration<Kind>] = &[
        Registration {
            target: CallTarget::function("open_position"),
            kind: Kind::Open,
        },
        Registration {
            target: CallTarget::qualified("gateway", "remove_liquidity"),
            kind: Kind::Remove,
        },
        Registration {
            target: CallTarget::function("collect_reward"),
            kind: Kind::Collect,
        },
    ];

    fn move_call(package: &str, module: &str, function: &str) -> Command {
        Command::MoveCall(MoveCall {
            package: package.into(),
            module: module.into(),
            function: function.into(),
            type_arguments: vec![],
            arguments: vec![],
        })
    }

    fn tx(commands: Vec<Command>) -> TransactionData {
        TransactionData {
            commands,
            ..Default::default()
        }
    }

    #[test]
    fn test_target_matching() {
        let call = MoveCall {
            package: "0x1".into(),
            module: "gateway".into(),
            function: "remove_liquidity".into(),
            type_arguments: vec![],
            arguments: vec![],
        };
        assert!(CallTarget::function("remove_liquidity").matches(&call));
        assert!(CallTarget::qualified("gateway", "remove_liquidity").matches(&call));
        assert!(!CallTarget::qualified("pool", "remove_liquidity").matches(&call));
        assert!(!CallTarget::function("open_position").matches(&call));
        assert_eq!(CallTarget::function("f").display(), "*::f");
    }

    #[test]
    fn test_priority_first_match_wins() {
        let tx = tx(vec![
            move_call("0x1", "gateway", "remove_liquidity"),
            move_call("0x1", "pool", "open_position"),
        ]);
        let index = CallIndex::build(&tx, TABLE, &PackageFilter::default());
        assert_eq!(index.classify(&[Kind::Open, Kind::Remove]), Some(Kind::Open));
        assert_eq!(index.classify(&[Kind::Remove, Kind::Open]), Some(Kind::Remove));
        assert_eq!(index.classify(&[Kind::Collect]), None);
    }

    #[test]
    fn test_module_qualified_target_rejects_other_modules() {
        let tx = tx(vec![move_call("0x1", "pool", "remove_liquidity")]);
        let index = CallIndex::build(&tx, TABLE, &PackageFilter::default());
        assert_eq!(index.classify(&[Kind::Remove]), None);
    }

    #[test]
    fn test_all_keeps_stream_order() {
        let tx = tx(vec![
            Command::Other {
                kind: "SplitCoins".into(),
            },
            move_call("0xa", "gateway", "collect_reward"),
            move_call("0x1", "pool", "open_position"),
            move_call("0xb", "gateway", "collect_reward"),
        ]);
        let index = CallIndex::build(&tx, TABLE, &PackageFilter::default());
        let packages: Vec<&str> = index
            .all(Kind::Collect)
            .iter()
            .map(|c| c.package.as_str())
            .collect();
        assert_eq!(packages, vec!["0xa", "0xb"]);
        assert!(index.all(Kind::Remove).is_empty());
        assert_eq!(index.first(Kind::Collect).unwrap().package, "0xa");
    }

    #[test]
    fn test_require_missing_call() {
        let tx = tx(vec![]);
        let index = CallIndex::build(&tx, TABLE, &PackageFilter::default());
        let err = index.require(Kind::Open, "open_position").unwrap_err();
        assert_eq!(err.to_string(), "Malformed input: missing open_position call");
    }

    #[test]
    fn test_package_filter() {
        let filter = PackageFilter::new(["0x0A"]).unwrap();
        assert!(!filter.is_empty());
        assert!(filter.allows("0xa"));
        assert!(filter.allows(&format!("0x{:0>64}", "a")));
        assert!(!filter.allows("0xb"));
        assert!(PackageFilter::default().allows("anything"));

        let tx = tx(vec![
            move_call("0xb", "pool", "open_position"),
            move_call("0xa", "gateway", "collect_reward"),
        ]);
        let index = CallIndex::build(&tx, TABLE, &filter);
        assert_eq!(index.classify(&[Kind::Open, Kind::Collect]), Some(Kind::Collect));
    }

    #[test]
    fn test_package_filter_rejects_invalid_ids() {
        let err = PackageFilter::new(["0xa", "not-a-package"]).unwrap_err();
        assert!(matches!(err, Error::InvalidPackageId(ref id) if id == "not-a-package"));
        assert!(PackageFilter::new([""]).is_err());
        assert!(PackageFilter::new(Vec::<String>::new()).unwrap().is_empty());
    }
}
