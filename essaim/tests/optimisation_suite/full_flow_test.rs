// FICHIER : essaim/tests/optimisation_suite/full_flow_test.rs

use essaim::algorithm::{Algorithm, CooperationStrategy};
use essaim::config::RunConfig;
use essaim::data::{DataSource, SlidingWindow};
use essaim::entity::keys;
use essaim::utils::read_lock;
use serde_json::json;

#[test]
fn test_configuration_to_summaries_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("iles.yaml");
    std::fs::write(
        &path,
        r#"
name: iles
problem:
  function: elliptic
  domain: "R(-2, 2)^2"
  objective: minimise
population:
  size: 8
  sub_populations: 3
  velocity_scale: 0.25
  seed: 17
boundary:
  type: periodic
iterator:
  type: reverse
strategy:
  type: migration
  interval: 2
  migrants: 2
stopping:
  max_iterations: 6
restarts: 2
"#,
    )
    .unwrap();

    let config = RunConfig::from_file(&path).unwrap();
    let plan = config.build().unwrap();
    let summaries = plan.execute().unwrap();

    assert_eq!(summaries.len(), 2);
    for summary in &summaries {
        assert_eq!(summary.iterations, 6);
        assert_eq!(summary.populations, 3);
        assert_eq!(summary.particles, 24);

        let best = summary.best.as_ref().unwrap();
        assert_eq!(best.position.len(), 2);
        // Elliptique minimisée : fitness = -f(x) <= 0
        assert!(best.fitness.value() <= 0.0);
    }

    // Le résumé est sérialisable tel quel pour le CLI
    let encoded = serde_json::to_value(&summaries).unwrap();
    assert_eq!(encoded[0]["iterations"], json!(6));
}

#[test]
fn test_competitive_run_uses_scoreboards() {
    let config = RunConfig::from_str_json(
        &json!({
            "name": "duel",
            "problem": { "function": "rosenbrock", "domain": "R(-2, 2)^2" },
            "population": { "size": 6, "sub_populations": 2, "seed": 4 },
            "boundary": { "type": "random_reinitialisation", "seed": 8 },
            "strategy": { "type": "competitive", "opponents": 3 },
            "stopping": { "max_iterations": 2 }
        })
        .to_string(),
    )
    .unwrap();

    let mut plan = config.build().unwrap();
    assert_eq!(
        plan.algorithm.strategy(),
        CooperationStrategy::Competitive { opponents: 3 }
    );
    plan.algorithm.initialise().unwrap();
    plan.algorithm.run(&plan.stopping).unwrap();

    for algorithm in plan.algorithm.iter() {
        let algorithm = algorithm.unwrap();
        let pba = read_lock(&algorithm);
        assert_eq!(pba.iterations(), 2);
        for particle in pba.particles() {
            let board = particle.properties().scoreboard(keys::BOARD).unwrap();
            assert_eq!(board.games(), 3);
            assert_eq!(particle.fitness().unwrap().value(), f64::from(board.wins));
            assert!(particle.position().iter().all(|c| c.is_within_bounds()));
        }
    }
}

#[test]
fn test_sliding_window_feeds_a_population() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("serie.arff");
    std::fs::write(
        &data,
        "@relation serie\n@attribute x numeric\n@attribute y numeric\n@data\n0.1,0.2\n0.3,0.4\n0.5,0.6\n0.7,0.8\n",
    )
    .unwrap();

    let mut window = SlidingWindow::new(2, 1).with_source(&data);
    window.initialise_window().unwrap();

    let config = RunConfig::from_str_json(
        &json!({
            "problem": { "function": "sphere", "domain": "R(-1, 1)^2" },
            "population": { "size": 1 }
        })
        .to_string(),
    )
    .unwrap();
    let plan = config.build().unwrap();
    let shared = plan.algorithm.get(0).unwrap();

    write_seed(&shared, &window);
    assert_eq!(read_lock(&shared).get(1).unwrap().position().to_reals(), vec![0.3, 0.4]);

    assert!(window.tick());
    write_seed(&shared, &window);
    let pba = read_lock(&shared);
    assert_eq!(pba.size(), window.len());
    assert_eq!(pba.get(0).unwrap().position().to_reals(), vec![0.5, 0.6]);
}

fn write_seed(shared: &essaim::algorithm::SharedAlgorithm, window: &SlidingWindow) {
    essaim::utils::write_lock(shared).seed_from(window).unwrap();
}
