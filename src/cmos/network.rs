//! Series/parallel transistor networks and inverter stages

use std::fmt;

use itertools::Itertools;

use crate::expr::{BinaryOp, Expr};
use crate::Error;

/// Type of a transistor
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum TransistorKind {
    /// N-channel, conducts when its gate is high
    Nmos,
    /// P-channel, conducts when its gate is low
    Pmos,
}

impl TransistorKind {
    /// The complementary transistor type
    pub fn dual(self) -> TransistorKind {
        match self {
            TransistorKind::Nmos => TransistorKind::Pmos,
            TransistorKind::Pmos => TransistorKind::Nmos,
        }
    }

    /// Returns whether the transistor conducts for the given gate level
    pub fn conducts(self, gate_high: bool) -> bool {
        match self {
            TransistorKind::Nmos => gate_high,
            TransistorKind::Pmos => !gate_high,
        }
    }
}

impl fmt::Display for TransistorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransistorKind::Nmos => write!(f, "nmos"),
            TransistorKind::Pmos => write!(f, "pmos"),
        }
    }
}

/// A single transistor
///
/// An inverted device has its gate driven by the input inverter of its variable,
/// never directly by a complemented symbol.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Device {
    /// Transistor type
    pub kind: TransistorKind,
    /// Variable (or constant) driving the gate
    pub gate: char,
    /// Whether the gate is driven through an input inverter
    pub inverted: bool,
}

impl Device {
    /// Same gate signal, complementary transistor type
    pub fn dual(&self) -> Device {
        Device {
            kind: self.kind.dual(),
            ..*self
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inverted {
            write!(f, "{} !{}", self.kind, self.gate)
        } else {
            write!(f, "{} {}", self.kind, self.gate)
        }
    }
}

/// Series/parallel transistor network
///
/// Networks are derived from an expression and rebuilt rather than modified.
/// Series and Parallel nodes always have at least one child.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum NetworkNode {
    /// A single transistor
    Device(Device),
    /// Conducts when all children conduct
    Series(Vec<NetworkNode>),
    /// Conducts when any child conducts
    Parallel(Vec<NetworkNode>),
}

impl NetworkNode {
    /// Dual network: swap series and parallel, and the transistor types; gate signals are kept
    ///
    /// Applying it twice gives back the original network.
    pub fn dual(&self) -> NetworkNode {
        match self {
            NetworkNode::Device(d) => NetworkNode::Device(d.dual()),
            NetworkNode::Series(v) => NetworkNode::Parallel(v.iter().map(|n| n.dual()).collect()),
            NetworkNode::Parallel(v) => NetworkNode::Series(v.iter().map(|n| n.dual()).collect()),
        }
    }

    /// Number of transistors
    pub fn nb_devices(&self) -> usize {
        match self {
            NetworkNode::Device(_) => 1,
            NetworkNode::Series(v) | NetworkNode::Parallel(v) => {
                v.iter().map(|n| n.nb_devices()).sum()
            }
        }
    }

    /// All transistors, from left to right
    pub fn devices(&self) -> Vec<Device> {
        let mut ret = Vec::new();
        self.collect_devices(&mut ret);
        ret
    }

    fn collect_devices(&self, ret: &mut Vec<Device>) {
        match self {
            NetworkNode::Device(d) => ret.push(*d),
            NetworkNode::Series(v) | NetworkNode::Parallel(v) => {
                for n in v {
                    n.collect_devices(ret);
                }
            }
        }
    }

    /// Largest number of transistors traversed in series between the two terminals
    pub fn stack_height(&self) -> usize {
        match self {
            NetworkNode::Device(_) => 1,
            NetworkNode::Series(v) => v.iter().map(|n| n.stack_height()).sum(),
            NetworkNode::Parallel(v) => v.iter().map(|n| n.stack_height()).max().unwrap_or(0),
        }
    }

    /// Returns whether no Series or Parallel node is empty
    pub fn is_well_formed(&self) -> bool {
        match self {
            NetworkNode::Device(_) => true,
            NetworkNode::Series(v) | NetworkNode::Parallel(v) => {
                !v.is_empty() && v.iter().all(|n| n.is_well_formed())
            }
        }
    }
}

impl fmt::Display for NetworkNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkNode::Device(d) => write!(f, "{d}"),
            NetworkNode::Series(v) => write!(f, "series({})", v.iter().join(", ")),
            NetworkNode::Parallel(v) => write!(f, "parallel({})", v.iter().join(", ")),
        }
    }
}

/// Signal at the input of an inverter stage
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum InverterInput {
    /// A primary variable, to supply its complement to the devices that need it
    Variable(char),
    /// The output of the main stage, to restore the polarity of the function
    Stage,
}

/// A PMOS/NMOS pair: the PMOS pulls the output up and the NMOS pulls it down,
/// both gates being driven by the same input
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Inverter {
    /// Signal driving both gates
    pub input: InverterInput,
}

impl Inverter {
    /// Transistor types of the pull-up and pull-down devices
    pub fn devices(&self) -> [TransistorKind; 2] {
        [TransistorKind::Pmos, TransistorKind::Nmos]
    }
}

impl fmt::Display for Inverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.input {
            InverterInput::Variable(c) => write!(f, "inv({c})"),
            InverterInput::Stage => write!(f, "inv(out)"),
        }
    }
}

fn not_expanded(what: String) -> Error {
    Error::InternalConsistencyFault(format!("{what} in an expression that should be expanded"))
}

/// Build the pull-down network of an expanded expression
///
/// Variables become NMOS devices, And becomes a series connection and Or a parallel connection.
/// The expression must only contain And, Or, variables and complemented variables.
pub fn build_pulldown(expr: &Expr) -> Result<NetworkNode, Error> {
    match expr {
        Expr::Var(c) => Ok(NetworkNode::Device(Device {
            kind: TransistorKind::Nmos,
            gate: *c,
            inverted: false,
        })),
        Expr::Not(a) => match **a {
            Expr::Var(c) => Ok(NetworkNode::Device(Device {
                kind: TransistorKind::Nmos,
                gate: c,
                inverted: true,
            })),
            _ => Err(not_expanded(format!("complement of {a}"))),
        },
        Expr::Binary(BinaryOp::And, a, b) => {
            Ok(NetworkNode::Series(vec![build_pulldown(a)?, build_pulldown(b)?]))
        }
        Expr::Binary(BinaryOp::Or, a, b) => {
            Ok(NetworkNode::Parallel(vec![build_pulldown(a)?, build_pulldown(b)?]))
        }
        Expr::Binary(op, _, _) => Err(not_expanded(format!("{op} node"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmos::expand::expand;
    use crate::expr::generators::random::random_expr;
    use std::collections::BTreeSet;

    fn nmos(c: char) -> NetworkNode {
        NetworkNode::Device(Device {
            kind: TransistorKind::Nmos,
            gate: c,
            inverted: false,
        })
    }

    fn pmos(c: char) -> NetworkNode {
        NetworkNode::Device(Device {
            kind: TransistorKind::Pmos,
            gate: c,
            inverted: false,
        })
    }

    #[test]
    fn test_pulldown() {
        let e = Expr::or(Expr::and(Expr::var('a'), Expr::var('b')), Expr::var('c'));
        let n = build_pulldown(&e).unwrap();
        assert_eq!(
            n,
            NetworkNode::Parallel(vec![NetworkNode::Series(vec![nmos('a'), nmos('b')]), nmos('c')])
        );
        assert_eq!(n.nb_devices(), 3);
        assert_eq!(n.stack_height(), 2);
        assert_eq!(format!("{n}"), "parallel(series(nmos a, nmos b), nmos c)");
    }

    #[test]
    fn test_inverted_device() {
        let e = Expr::and(Expr::not(Expr::var('a')), Expr::var('b'));
        let n = build_pulldown(&e).unwrap();
        let devices = n.devices();
        assert!(devices[0].inverted);
        assert_eq!(devices[0].gate, 'a');
        assert!(!devices[1].inverted);
        assert_eq!(format!("{n}"), "series(nmos !a, nmos b)");
    }

    #[test]
    fn test_not_expanded() {
        let e = Expr::and(Expr::var('a'), Expr::xor(Expr::var('b'), Expr::var('c')));
        assert!(matches!(
            build_pulldown(&e),
            Err(Error::InternalConsistencyFault(_))
        ));
        let e = Expr::not(Expr::and(Expr::var('a'), Expr::var('b')));
        assert!(matches!(
            build_pulldown(&e),
            Err(Error::InternalConsistencyFault(_))
        ));
    }

    #[test]
    fn test_dual() {
        let n = NetworkNode::Parallel(vec![NetworkNode::Series(vec![nmos('a'), nmos('b')]), nmos('c')]);
        let d = n.dual();
        assert_eq!(
            d,
            NetworkNode::Series(vec![NetworkNode::Parallel(vec![pmos('a'), pmos('b')]), pmos('c')])
        );
        assert_eq!(d.dual(), n);
    }

    #[test]
    fn test_dual_involution() {
        for seed in 0..100 {
            let mut inv = BTreeSet::new();
            let clean = expand(&random_expr(4, 5, seed), &mut inv);
            let n = build_pulldown(&clean).unwrap();
            assert!(n.is_well_formed());
            let d = n.dual();
            assert_eq!(d.nb_devices(), n.nb_devices());
            assert!(d.devices().iter().all(|x| x.kind == TransistorKind::Pmos));
            assert_eq!(d.dual(), n);
        }
    }
}
