//! Switch-level simulation of synthesized circuits
//!
//! Devices are ideal switches: an NMOS conducts when its gate is high, a PMOS when its gate is low.
//! Complemented gate signals come from the input inverters, which are simulated the same way.

use log::trace;

use crate::cmos::network::{Device, NetworkNode, TransistorKind};
use crate::cmos::CmosCircuit;
use crate::eval::{assignment, signal_value, SymbolTable, TruthTable};
use crate::Error;

/// Output of an inverter stage for a given input level
///
/// The PMOS connects the output to the supply, the NMOS to ground.
pub fn inverter_output(input: bool) -> Result<bool, Error> {
    let up = TransistorKind::Pmos.conducts(input);
    let down = TransistorKind::Nmos.conducts(input);
    match (up, down) {
        (true, false) => Ok(true),
        (false, true) => Ok(false),
        _ => Err(Error::InternalConsistencyFault(
            "Inverter output is not driven to a single rail".to_string(),
        )),
    }
}

/// Returns whether a single device conducts
pub fn device_conducts(device: &Device, symbols: &SymbolTable) -> Result<bool, Error> {
    let mut gate = signal_value(device.gate, symbols)?;
    if device.inverted {
        gate = inverter_output(gate)?;
    }
    Ok(device.kind.conducts(gate))
}

/// Returns whether a network connects its two terminals
pub fn conducts(node: &NetworkNode, symbols: &SymbolTable) -> Result<bool, Error> {
    match node {
        NetworkNode::Device(d) => device_conducts(d, symbols),
        NetworkNode::Series(v) | NetworkNode::Parallel(v) if v.is_empty() => Err(
            Error::InternalConsistencyFault("Empty series or parallel connection".to_string()),
        ),
        NetworkNode::Series(v) => {
            for n in v {
                if !conducts(n, symbols)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        NetworkNode::Parallel(v) => {
            for n in v {
                if conducts(n, symbols)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}

/// Output of the circuit, after the output inverter if any
///
/// Exactly one of the two networks must conduct: otherwise the stage output would be
/// floating or shorted, which is reported as a fault.
pub fn circuit_output(circuit: &CmosCircuit, symbols: &SymbolTable) -> Result<bool, Error> {
    let down = conducts(&circuit.pulldown, symbols)?;
    let up = conducts(&circuit.pullup, symbols)?;
    let stage = match (up, down) {
        (true, false) => true,
        (false, true) => false,
        (true, true) => {
            return Err(Error::InternalConsistencyFault(
                "Pull-up and pull-down networks both conduct".to_string(),
            ))
        }
        (false, false) => {
            return Err(Error::InternalConsistencyFault(
                "Stage output is floating".to_string(),
            ))
        }
    };
    if circuit.needs_output_inverter {
        inverter_output(stage)
    } else {
        Ok(stage)
    }
}

/// Check a circuit against the truth table of its expression
///
/// Every row is simulated. Every complemented device must also be supplied by an input inverter.
pub fn verify(circuit: &CmosCircuit, table: &TruthTable) -> Result<(), Error> {
    for network in [&circuit.pulldown, &circuit.pullup] {
        for d in network.devices() {
            if d.inverted && !circuit.inverted_inputs.contains(&d.gate) {
                return Err(Error::InternalConsistencyFault(format!(
                    "No input inverter for device {d}"
                )));
            }
        }
    }
    for i in 0..table.nb_rows() {
        let symbols = assignment(table.variables(), i);
        let output = circuit_output(circuit, &symbols)?;
        trace!("Row {i}: circuit {output}, expected {}", table.output(i));
        if output != table.output(i) {
            return Err(Error::InternalConsistencyFault(format!(
                "Circuit output differs from the truth table at row {i}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::cmos::synthesize;
    use crate::eval::evaluate;
    use crate::expr::generators::random::random_expr;
    use crate::expr::{Expr, Limits};
    use crate::Expression;

    #[test]
    fn test_inverter() {
        assert_eq!(inverter_output(false), Ok(true));
        assert_eq!(inverter_output(true), Ok(false));
    }

    #[test]
    fn test_conduction() {
        let c = Expression::parse("a and !b").unwrap().synthesize().unwrap();
        let s = assignment(&['a', 'b'], 0b10);
        assert_eq!(conducts(&c.pulldown, &s), Ok(true));
        assert_eq!(conducts(&c.pullup, &s), Ok(false));
        assert_eq!(circuit_output(&c, &s), Ok(true));
        let s = assignment(&['a', 'b'], 0b11);
        assert_eq!(conducts(&c.pulldown, &s), Ok(false));
        assert_eq!(circuit_output(&c, &s), Ok(false));
    }

    #[test]
    fn test_constant_gate() {
        let c = Expression::parse("a and 1").unwrap().synthesize().unwrap();
        let t = Expression::parse("a and 1").unwrap().truth_table().unwrap();
        assert_eq!(verify(&c, &t), Ok(()));
    }

    #[test]
    fn test_empty_network() {
        let s = SymbolTable::default();
        assert!(conducts(&NetworkNode::Series(Vec::new()), &s).is_err());
    }

    #[test]
    fn test_missing_inverter() {
        let mut c = Expression::parse("a or !b").unwrap().synthesize().unwrap();
        let t = Expression::parse("a or !b").unwrap().truth_table().unwrap();
        assert_eq!(verify(&c, &t), Ok(()));
        c.inverted_inputs = BTreeSet::new();
        assert!(matches!(
            verify(&c, &t),
            Err(Error::InternalConsistencyFault(_))
        ));
    }

    #[test]
    fn test_wrong_table() {
        let c = Expression::parse("a or b").unwrap().synthesize().unwrap();
        let t = Expression::parse("a and b").unwrap().truth_table().unwrap();
        assert!(verify(&c, &t).is_err());
    }

    #[test]
    fn test_soundness() {
        for seed in 0..300 {
            let expr = random_expr(4, 6, seed);
            let vars = expr.variables();
            let circuit = synthesize(&expr, &Limits::default()).unwrap();
            let table = TruthTable::build(&expr, &vars, 16).unwrap();
            for i in 0..table.nb_rows() {
                let s = assignment(&vars, i);
                let core = evaluate(&circuit.core, &s).unwrap();
                assert_eq!(conducts(&circuit.pulldown, &s), Ok(core), "{expr}");
                assert_eq!(conducts(&circuit.pullup, &s), Ok(!core), "{expr}");
            }
            assert_eq!(verify(&circuit, &table), Ok(()), "{expr}");
        }
    }

    #[test]
    fn test_involution_preserves_output() {
        let expr = Expr::xnor(Expr::var('a'), Expr::nor(Expr::var('b'), Expr::var('c')));
        let mut circuit = synthesize(&expr, &Limits::default()).unwrap();
        let table = TruthTable::build(&expr, &expr.variables(), 16).unwrap();
        circuit.pullup = circuit.pulldown.dual().dual().dual();
        assert_eq!(verify(&circuit, &table), Ok(()));
    }
}
