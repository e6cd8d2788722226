// FICHIER : essaim/tests/optimisation_suite/engine_properties_test.rs

use essaim::algorithm::{
    Algorithm, AlgorithmIterator, CooperationStrategy, IteratorState,
    MultiPopulationBasedAlgorithm, PopulationBasedAlgorithm,
};
use essaim::data::{DataSource, DataTable, Pattern};
use essaim::entity::Particle;
use essaim::problem::{ContinuousFunction, Evaluator, FunctionOptimisationProblem, Objective};
use essaim::pso::{BoundaryConstraint, PositionUpdate};
use essaim::types::{Domain, Vector};
use essaim::utils::prelude::*;
use essaim::utils::{read_lock, write_lock};
use rand::prelude::*;

fn problem(domain: &str) -> Arc<dyn Evaluator> {
    Arc::new(FunctionOptimisationProblem::new(
        ContinuousFunction::Sphere,
        Domain::parse(domain).unwrap(),
        Objective::Minimise,
    ))
}

fn swarm(name: &str, size: usize) -> PopulationBasedAlgorithm {
    PopulationBasedAlgorithm::new(name, problem("R(-2, 2)^3"), size)
        .with_seed(size as u64)
        .with_velocity_scale(0.3)
}

#[test]
fn in_bounds_updates_commit_the_exact_sum() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut update = PositionUpdate::bounded(BoundaryConstraint::deflection());

    for _ in 0..200 {
        let x: f64 = rng.random_range(-1.0..1.0);
        let v: f64 = rng.random_range(-0.9..0.9);
        let mut p = Particle::new(Vector::bounded(&[x], -2.0, 2.0), Vector::of(&[v]));

        update.update_position(&mut p).unwrap();

        assert_eq!(p.position().real(0).unwrap(), x + v);
        assert_eq!(p.velocity().real(0).unwrap(), v);
    }
}

#[test]
fn upper_bound_is_exclusive_lower_bound_inclusive() {
    let mut update = PositionUpdate::bounded(BoundaryConstraint::deflection());

    // Exactement sur la borne basse : accepté tel quel
    let mut low = Particle::new(Vector::bounded(&[-1.0], -2.0, 2.0), Vector::of(&[-1.0]));
    update.update_position(&mut low).unwrap();
    assert_eq!(low.position().real(0).unwrap(), -2.0);
    assert_eq!(low.velocity().real(0).unwrap(), -1.0);

    // Exactement sur la borne haute : violation, la vitesse rebondit
    let mut high = Particle::new(Vector::bounded(&[1.0], -2.0, 2.0), Vector::of(&[1.0]));
    update.update_position(&mut high).unwrap();
    assert_eq!(high.position().real(0).unwrap(), 2.0);
    assert_eq!(high.velocity().real(0).unwrap(), -1.0);
}

#[test]
fn deflection_reference_case() {
    let mut update = PositionUpdate::bounded(BoundaryConstraint::deflection());
    let mut p = Particle::new(Vector::bounded(&[-2.0], -2.0, 2.0), Vector::of(&[-1.0]));

    update.update_position(&mut p).unwrap();

    assert_eq!(p.position().real(0).unwrap(), -1.0);
    assert_eq!(p.velocity().real(0).unwrap(), 1.0);
}

#[test]
fn dimension_mismatch_aborts_the_update() {
    let mut update = PositionUpdate::default();
    let mut p = Particle::new(Vector::bounded(&[0.0, 0.0], -1.0, 1.0), Vector::of(&[0.1]));

    let err = update.update_position(&mut p).unwrap_err();
    assert!(err.is_precondition());
    assert!(err.to_string().contains(&p.id().to_string()));
}

#[test]
fn full_traversal_yields_each_population_once_in_order() {
    let mut mpba = MultiPopulationBasedAlgorithm::new("multi", CooperationStrategy::Sequential);
    mpba.set_populations((0..5).map(|i| swarm(&format!("p{}", i), 2)).collect());

    mpba.set_algorithm_iterator(AlgorithmIterator::sequential());
    let mut it = mpba.iter();

    let mut names = Vec::new();
    for call in 1..=5 {
        assert!(it.has_next());
        let algorithm = it.next_algorithm().unwrap();
        names.push(read_lock(&algorithm).name().to_string());
        assert_eq!(it.has_next(), call < 5);
    }
    assert_eq!(names, vec!["p0", "p1", "p2", "p3", "p4"]);
    assert!(matches!(it.next_algorithm(), Err(EngineError::IteratorExhausted)));
}

#[test]
fn iterator_clone_has_its_own_cursor() {
    let mut mpba = MultiPopulationBasedAlgorithm::new("multi", CooperationStrategy::Sequential);
    mpba.set_populations(vec![swarm("a", 2), swarm("b", 2), swarm("c", 2)]);

    let mut driver = mpba.iter();
    driver.next_algorithm().unwrap();

    let mut reporter = driver.get_clone();
    while reporter.has_next() {
        reporter.next_algorithm().unwrap();
    }

    assert_eq!(reporter.state(), IteratorState::Exhausted);
    assert_eq!(driver.state(), IteratorState::InProgress);
    assert!(driver.has_next());
}

#[test]
fn deep_clone_shares_no_entity() {
    let mut original = MultiPopulationBasedAlgorithm::new("multi", CooperationStrategy::Sequential);
    original.set_populations(vec![swarm("a", 4), swarm("b", 4)]);
    original.initialise().unwrap();

    let before = read_lock(&original.get(1).unwrap())
        .get(2)
        .unwrap()
        .position()
        .to_reals();

    let mut copy = original.clone();
    {
        let target = copy.get(1).unwrap();
        let mut pba = write_lock(&target);
        let particle = pba.get_mut(2).unwrap();
        particle.position_mut().set_real(0, 1.5).unwrap();
        particle.properties_mut().remove("fitness");
    }
    copy.run(&essaim::algorithm::StoppingCondition::maximum_iterations(3))
        .unwrap();

    let after = read_lock(&original.get(1).unwrap())
        .get(2)
        .unwrap()
        .position()
        .to_reals();
    assert_eq!(before, after);
    assert_eq!(original.iterations(), 0);

    // Itérateur relié à la liste du clone, jamais à celle de l'original
    assert!(copy.binds(copy.algorithm_iterator()));
    assert!(!original.binds(copy.algorithm_iterator()));
    assert!(!copy.binds(original.algorithm_iterator()));
    assert!(!Arc::ptr_eq(
        &copy.get(0).unwrap(),
        &original.get(0).unwrap()
    ));
}

#[test]
fn setting_the_list_rebinds_the_iterator() {
    let mut mpba = MultiPopulationBasedAlgorithm::new("multi", CooperationStrategy::Sequential);
    mpba.set_populations(vec![swarm("old-a", 2), swarm("old-b", 2)]);
    let old_list = mpba.populations();
    let old_iterator = mpba.iter();

    mpba.set_populations(vec![swarm("new-a", 2), swarm("new-b", 2), swarm("new-c", 2)]);

    assert!(mpba.binds(mpba.algorithm_iterator()));
    assert!(!mpba.binds(&old_iterator));

    let names: Vec<String> = mpba
        .iter()
        .map(|a| read_lock(&a.unwrap()).name().to_string())
        .collect();
    assert_eq!(names, vec!["new-a", "new-b", "new-c"]);

    // L'ancienne liste n'est plus avancée
    mpba.initialise().unwrap();
    mpba.perform_iteration().unwrap();
    for algorithm in &old_list {
        assert_eq!(read_lock(algorithm).iterations(), 0);
        assert!(read_lock(algorithm).is_empty());
    }
}

#[test]
fn seeding_round_trip() {
    let table = DataTable::from_rows(
        (0..7)
            .map(|i| {
                let x = i as f64 / 4.0 - 1.0;
                Pattern::new(Vector::of(&[x, -x, 0.5 * x]), None)
            })
            .collect(),
    );

    let mut pba = PopulationBasedAlgorithm::new("seeded", problem("R(-2, 2)^3"), 0);
    pba.seed_from(&table).unwrap();

    assert_eq!(pba.size(), table.len());
    for i in 0..table.len() {
        assert_eq!(
            pba.get(i).unwrap().position().to_reals(),
            table.row(i).unwrap().vector.to_reals()
        );
    }
}
