//! Solve tests for the modeling layer.
//!
//! Test cases are data: each builds a model and states the optimal value.
//! The runner solves every case on every backend that accepts it.

use formulary::prelude::*;

/// Tolerance for comparing floating point results
const TOL: f64 = 1e-4;

/// Backends accepting continuous models.
const LP_BACKENDS: &[&str] = &["GLOP", "CBC"];

/// A test case definition
struct TestCase {
    name: &'static str,
    /// Function that builds the model and returns (model, expected_value)
    build: fn() -> (Model, f64),
}

/// Continuous test cases
fn lp_test_cases() -> Vec<TestCase> {
    vec![
        TestCase {
            name: "sum_lower_bounds",
            build: || {
                // minimize sum(x) s.t. x >= 1, x in R^5
                let mut model = Model::new("sum_lower_bounds");
                let x = model.num_vars(5, 1.0, f64::INFINITY, "x");
                model.minimize(sum(x.iter()));
                (model, 5.0)
            },
        },
        TestCase {
            name: "sum_equality_constraint",
            build: || {
                // minimize sum(x) s.t. x == 2, x in R^3
                let mut model = Model::new("sum_equality_constraint");
                let x = model.num_vars(3, f64::NEG_INFINITY, f64::INFINITY, "x");
                for &xi in &x {
                    model.add_constraint(xi.equals(2.0));
                }
                model.minimize(sum(x.iter()));
                (model, 6.0)
            },
        },
        TestCase {
            name: "maximize_upper_bound",
            build: || {
                // maximize sum(x) s.t. x <= 3, x in R^4
                let mut model = Model::new("maximize_upper_bound");
                let x = model.num_vars(4, f64::NEG_INFINITY, 3.0, "x");
                model.maximize(sum(x.iter()));
                (model, 12.0)
            },
        },
        TestCase {
            name: "two_resource_lp",
            build: || {
                // maximize 3x + 2y + 5z s.t. 2x + y + 3z <= 100, x + 2y + z <= 80
                // y = 28, z = 24, x = 0 gives 176
                let mut model = Model::new("two_resource_lp");
                let x = model.num_vars(3, 0.0, f64::INFINITY, "x");
                model.add_constraint(dot(&[2.0, 1.0, 3.0], &x).leq(100.0));
                model.add_constraint(dot(&[1.0, 2.0, 1.0], &x).leq(80.0));
                model.maximize(dot(&[3.0, 2.0, 5.0], &x));
                (model, 176.0)
            },
        },
        TestCase {
            name: "covering_lp",
            build: || {
                // minimize x + y s.t. x + 2y >= 4, 3x + y >= 6
                // vertex (1.6, 1.2), value 2.8
                let mut model = Model::new("covering_lp");
                let x = model.num_var(0.0, f64::INFINITY, "x");
                let y = model.num_var(0.0, f64::INFINITY, "y");
                model.add_constraint((x + 2.0 * y).geq(4.0));
                model.add_constraint((3.0 * x + y).geq(6.0));
                model.minimize(x + y);
                (model, 2.8)
            },
        },
        TestCase {
            name: "objective_constant",
            build: || {
                // minimize x + 10 s.t. x >= 2
                let mut model = Model::new("objective_constant");
                let x = model.num_var(f64::NEG_INFINITY, f64::INFINITY, "x");
                model.add_constraint(x.geq(2.0));
                model.minimize(x + 10.0);
                (model, 12.0)
            },
        },
        TestCase {
            name: "constants_on_both_sides",
            build: || {
                // minimize x s.t. x + 3 >= 2y + 1, y == 4
                let mut model = Model::new("constants_on_both_sides");
                let x = model.num_var(f64::NEG_INFINITY, f64::INFINITY, "x");
                let y = model.num_var(f64::NEG_INFINITY, f64::INFINITY, "y");
                model.add_constraint((x + 3.0).geq(2.0 * y + 1.0));
                model.add_constraint(y.equals(4.0));
                model.minimize(x);
                (model, 6.0)
            },
        },
        TestCase {
            name: "abs_epigraph",
            build: || {
                // minimize |x - 3| + |x + 1|, any x in [-1, 3] gives 4
                let mut model = Model::new("abs_epigraph");
                let x = model.num_var(f64::NEG_INFINITY, f64::INFINITY, "x");
                let a = abs_value(&mut model, x - 3.0, "a");
                let b = abs_value(&mut model, x + 1.0, "b");
                model.minimize(a + b);
                (model, 4.0)
            },
        },
        TestCase {
            name: "max_epigraph",
            build: || {
                // minimize max(x, 2 - x), optimum at x = 1
                let mut model = Model::new("max_epigraph");
                let x = model.num_var(f64::NEG_INFINITY, f64::INFINITY, "x");
                let t = max_of(&mut model, [LinExpr::from(x), 2.0 - x], "t");
                model.minimize(t);
                (model, 1.0)
            },
        },
        TestCase {
            name: "min_hypograph",
            build: || {
                // maximize min(x, 4 - 2x), optimum at x = 4/3
                let mut model = Model::new("min_hypograph");
                let x = model.num_var(f64::NEG_INFINITY, f64::INFINITY, "x");
                let t = min_of(&mut model, [LinExpr::from(x), 4.0 - 2.0 * x], "t");
                model.maximize(t);
                (model, 4.0 / 3.0)
            },
        },
    ]
}

/// Integer test cases
fn mip_test_cases() -> Vec<TestCase> {
    vec![
        TestCase {
            name: "production_integer",
            build: || {
                let mut model = Model::new("production_integer");
                let a = model.int_var(0.0, f64::INFINITY, "a");
                let b = model.int_var(0.0, f64::INFINITY, "b");
                model.add_constraint((2.0 * a + b).leq(100.0));
                model.add_constraint((a + 2.0 * b).leq(80.0));
                model.maximize(40.0 * a + 30.0 * b);
                (model, 2200.0)
            },
        },
        TestCase {
            name: "integrality_gap",
            build: || {
                // maximize x + y s.t. 2x + 2y <= 3; LP gives 1.5, integers 1
                let mut model = Model::new("integrality_gap");
                let x = model.int_var(0.0, 10.0, "x");
                let y = model.int_var(0.0, 10.0, "y");
                model.add_constraint((2.0 * x + 2.0 * y).leq(3.0));
                model.maximize(x + y);
                (model, 1.0)
            },
        },
        TestCase {
            name: "binary_choice",
            build: || {
                // pick at most two of four with values 5, 4, 3, 2
                let mut model = Model::new("binary_choice");
                let b = model.bool_vars(4, "b");
                model.add_constraint(sum(b.iter()).leq(2.0));
                model.maximize(dot(&[5.0, 4.0, 3.0, 2.0], &b));
                (model, 9.0)
            },
        },
        TestCase {
            name: "binary_product_bonus",
            build: || {
                // x, y binary, x + y <= 1 forbids the 10-point bonus for both
                let mut model = Model::new("binary_product_bonus");
                let x = model.bool_var("x");
                let y = model.bool_var("y");
                let both = binary_product(&mut model, &[x, y], "both").expect("binary");
                model.add_constraint((x + y).leq(1.0));
                model.maximize(3.0 * x + 2.0 * y + 10.0 * both);
                (model, 3.0)
            },
        },
        TestCase {
            name: "big_m_implication",
            build: || {
                // x earns 1 per unit up to 10 but only if not closed;
                // staying open costs 5
                let mut model = Model::new("big_m_implication");
                let closed = model.bool_var("closed");
                let x = model.num_var(0.0, 10.0, "x");
                implies(&mut model, closed, x.leq(0.0), 10.0).expect("binary");
                model.maximize(x - 5.0 * (1.0 - closed));
                (model, 5.0)
            },
        },
        TestCase {
            name: "all_different_sum",
            build: || {
                // three distinct integers in [1, 3], minimize x0 + 2 x1 + 3 x2
                let mut model = Model::new("all_different_sum");
                let x = model.int_vars(3, 1.0, 3.0, "x");
                all_different(&mut model, &x, "perm").expect("bounded");
                model.minimize(dot(&[1.0, 2.0, 3.0], &x));
                (model, 10.0)
            },
        },
    ]
}

/// Test cases expected to be infeasible
fn infeasible_test_cases() -> Vec<(&'static str, Model)> {
    vec![
        ("infeasible_bounds", {
            // x >= 1 and x <= 0 is infeasible
            let mut model = Model::new("infeasible_bounds");
            let x = model.num_vars(3, f64::NEG_INFINITY, f64::INFINITY, "x");
            for &xi in &x {
                model.add_constraint(xi.geq(1.0));
                model.add_constraint(xi.leq(0.0));
            }
            model.minimize(sum(x.iter()));
            model
        }),
        ("infeasible_equality", {
            // x == 1 and x == 2 is infeasible
            let mut model = Model::new("infeasible_equality");
            let x = model.num_var(f64::NEG_INFINITY, f64::INFINITY, "x");
            model.add_constraint(x.equals(1.0));
            model.add_constraint(x.equals(2.0));
            model.minimize(x);
            model
        }),
        ("infeasible_constant_row", {
            // 0 >= 1 after folding constants
            let mut model = Model::new("infeasible_constant_row");
            let x = model.num_var(0.0, 1.0, "x");
            model.add_constraint(LinExpr::constant(0.0).geq(1.0));
            model.minimize(x);
            model
        }),
    ]
}

/// Test cases expected to be unbounded
fn unbounded_test_cases() -> Vec<(&'static str, Model)> {
    vec![
        ("unbounded_below", {
            // minimize sum(x) with only upper bound
            let mut model = Model::new("unbounded_below");
            let x = model.num_vars(3, f64::NEG_INFINITY, f64::INFINITY, "x");
            for &xi in &x {
                model.add_constraint(xi.leq(1.0));
            }
            model.minimize(sum(x.iter()));
            model
        }),
        ("unbounded_above", {
            // maximize sum(x) with only lower bound
            let mut model = Model::new("unbounded_above");
            let x = model.num_vars(3, 1.0, f64::INFINITY, "x");
            model.maximize(sum(x.iter()));
            model
        }),
    ]
}

// ============================================================================
// Test runner
// ============================================================================

fn assert_optimal(case: &str, backend: &str, solution: &Solution, expected: f64) {
    assert_eq!(
        solution.status,
        SolveStatus::Optimal,
        "Model '{}' on {} should be optimal, got {:?}",
        case,
        backend,
        solution.status
    );
    let value = solution.objective.expect("should have value");
    let rel_err = (value - expected).abs() / (1.0 + expected.abs());
    assert!(
        rel_err < TOL,
        "Model '{}' on {}: expected {}, got {} (rel_err={})",
        case,
        backend,
        expected,
        value,
        rel_err
    );
}

#[test]
fn test_lp_cases() {
    for case in lp_test_cases() {
        for backend in LP_BACKENDS {
            let (model, expected) = (case.build)();
            let result = Solver::create(backend).and_then(|s| s.solve(&model));
            assert!(
                result.is_ok(),
                "Model '{}' should solve on {}: {:?}",
                case.name,
                backend,
                result.err()
            );
            assert_optimal(case.name, backend, &result.unwrap(), expected);
        }
    }
}

#[test]
fn test_mip_cases() {
    for case in mip_test_cases() {
        let (model, expected) = (case.build)();
        let solution = Solver::create("CBC")
            .and_then(|s| s.solve(&model))
            .unwrap_or_else(|e| panic!("Model '{}' should solve: {}", case.name, e));
        assert_optimal(case.name, "CBC", &solution, expected);
        assert!(
            formulary::verify::verify(&model, &solution, 1e-6).is_ok(),
            "Model '{}' solution fails verification",
            case.name
        );
    }
}

#[test]
fn test_mip_rejected_by_lp_backend() {
    for case in mip_test_cases() {
        let (model, _) = (case.build)();
        let result = Solver::create("GLOP").and_then(|s| s.solve(&model));
        assert!(
            matches!(result, Err(FormularyError::Unsupported { .. })),
            "Model '{}' should be rejected by GLOP, got {:?}",
            case.name,
            result
        );
    }
}

#[test]
fn test_infeasible() {
    for (name, model) in infeasible_test_cases() {
        for backend in LP_BACKENDS {
            match Solver::create(backend).and_then(|s| s.solve(&model)) {
                Ok(solution) if solution.status == SolveStatus::Infeasible => {
                    assert!(solution.objective.is_none());
                }
                other => {
                    panic!("Model '{}' on {} should be infeasible, got {:?}", name, backend, other);
                }
            }
        }
    }
}

#[test]
fn test_unbounded() {
    for (name, model) in unbounded_test_cases() {
        for backend in LP_BACKENDS {
            match Solver::create(backend).and_then(|s| s.solve(&model)) {
                Ok(solution) if solution.status == SolveStatus::Unbounded => {
                    // Expected
                }
                other => {
                    panic!("Model '{}' on {} should be unbounded, got {:?}", name, backend, other);
                }
            }
        }
    }
}

#[test]
fn test_unknown_backend() {
    match Solver::create("GUROBI-9000") {
        Err(FormularyError::UnknownBackend(name)) => assert_eq!(name, "GUROBI-9000"),
        other => panic!("expected UnknownBackend, got {:?}", other.map(|s| s.backend())),
    }
}

#[test]
fn test_backend_aliases() {
    for (name, backend) in [
        ("GLOP", Backend::Clarabel),
        ("pdlp", Backend::Clarabel),
        (" clarabel ", Backend::Clarabel),
        ("CBC", Backend::MicroLp),
        ("SCIP", Backend::MicroLp),
        ("CP-SAT", Backend::MicroLp),
        ("sat", Backend::MicroLp),
    ] {
        let solver = Solver::create(name).expect("known backend");
        assert_eq!(solver.backend(), backend, "alias {}", name);
        assert_eq!(solver.requested_name(), name);
    }
}

#[test]
fn test_model_validation() {
    let mut model = Model::new("bad_bounds");
    let x = model.num_var(2.0, 1.0, "x");
    model.minimize(x);
    let result = Solver::create("CBC").and_then(|s| s.solve(&model));
    assert!(matches!(result, Err(FormularyError::InvalidModel(_))));

    let mut other = Model::new("other");
    let y = other.num_var(0.0, 1.0, "y");
    let mut model = Model::new("foreign");
    let _ = model.num_var(0.0, 1.0, "x");
    model.minimize(y);
    let result = Solver::create("CBC").and_then(|s| s.solve(&model));
    assert!(matches!(result, Err(FormularyError::InvalidModel(_))));
}
