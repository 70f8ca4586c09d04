use glam::Vec3;
use magboots::{
    Body, BodyId, BootsConfig, BootsInput, CandidateSelector, Container, ContainerId, Feet,
    GridConfig, MagnetConfig, MagneticBoots, PhysicsWorld, SpatialGrid,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

const DT: f32 = 0.02;

/// Kerbal on EVA plus one steel plate floating next to it
fn eva_scene(plate_at: Vec3) -> (PhysicsWorld, ContainerId, ContainerId) {
    let mut world = PhysicsWorld::new();
    let kerbal = Container::new("kerbal").with_body(Body::new(Vec3::ZERO, 1.0));
    let plate = Container::new("plate").with_body(Body::new(plate_at, 4.0));
    let kerbal = world.add_container(kerbal);
    let plate = world.add_container(plate);
    (world, kerbal, plate)
}

fn wearer_input(world: &PhysicsWorld, kerbal: ContainerId) -> BootsInput {
    let position = world.get_container(kerbal).map(|c| c.position).unwrap_or(Vec3::ZERO);
    let feet = Feet::new(
        position + Vec3::new(-0.1, -0.4, 0.0),
        position + Vec3::new(0.1, -0.4, 0.0),
    );
    BootsInput::new(position, feet).with_own_container(kerbal)
}

fn random_world(rng: &mut StdRng, containers: usize) -> Vec<Container> {
    let mut world = PhysicsWorld::new();
    for _ in 0..containers {
        let center = Vec3::new(
            rng.random_range(-6000.0..6000.0),
            rng.random_range(-6000.0..6000.0),
            rng.random_range(-600.0..600.0),
        );
        let mut vessel = Container::new("debris");
        for _ in 0..rng.random_range(1..6) {
            let offset = Vec3::new(
                rng.random_range(-2.0..2.0),
                rng.random_range(-2.0..2.0),
                rng.random_range(-2.0..2.0),
            );
            vessel = vessel.with_body(Body::new(center + offset, rng.random_range(0.5..5.0)));
        }
        world.add_container(vessel);
    }
    world.containers().to_vec()
}

// ==================================================================================
// Candidate selection
// ==================================================================================

#[test]
fn grid_and_scan_select_the_same_bodies() {
    let mut rng = StdRng::seed_from_u64(2024);
    let containers = random_world(&mut rng, 400);
    let grid = SpatialGrid::build(&containers, GridConfig::default());
    let selector = CandidateSelector::default();
    let magnet = MagnetConfig::default().with_strength(1.0).expect("slider maximum");

    for container in containers.iter().take(40) {
        // Stand right next to a vessel so some bodies are in range
        let wearer = container.bodies[0].position + Vec3::new(0.5, 0.0, 0.0);
        let scanned = selector.select(containers.as_slice(), wearer, None, &magnet);
        let gridded = selector.select(&grid, wearer, None, &magnet);
        assert_eq!(scanned, gridded);
        assert!(!scanned.is_empty());
    }
}

#[test]
fn wearer_never_attracts_itself() {
    let (world, kerbal, plate) = eva_scene(Vec3::new(1.0, 0.0, 0.0));
    let selector = CandidateSelector::default();
    let input = wearer_input(&world, kerbal);

    let magnet = MagnetConfig::default();
    let picked = selector.select(&world, input.position, input.own_container, &magnet);
    assert_eq!(picked.len(), 1);
    assert_eq!(picked[0].container, plate);
}

// ==================================================================================
// Full step loop against the host world
// ==================================================================================

#[test]
fn wearer_and_plate_drift_together() {
    let (mut world, kerbal, plate) = eva_scene(Vec3::new(1.2, 0.0, 0.0));
    let config = BootsConfig::default().with_attract_bodies(true);
    let mut boots = MagneticBoots::new(config).expect("default config is valid");
    boots.on_crew_eva(true);
    boots.toggle();

    let gap = |world: &PhysicsWorld| {
        let a = world.get_container(kerbal).map(|c| c.position).unwrap_or(Vec3::ZERO);
        let b = world.get_container(plate).map(|c| c.position).unwrap_or(Vec3::ZERO);
        a.distance(b)
    };
    let start_gap = gap(&world);

    for _ in 0..50 {
        let input = wearer_input(&world, kerbal);
        let forces = boots.step(&input, &world).expect("boots are on");
        world.apply_boots_forces((kerbal, BodyId(0)), &forces);
        world.step(DT);
    }

    assert!(gap(&world) < start_gap);

    // Equal and opposite forces: total momentum stays at zero
    let momentum: Vec3 = world
        .containers()
        .iter()
        .flat_map(|c| c.bodies.iter())
        .map(|b| b.velocity * b.mass)
        .sum();
    assert!(momentum.length() < 1.0e-5, "momentum drifted to {momentum:?}");

    // Wearer moved towards the plate along +x
    let kerbal_body = world.get_body(kerbal, BodyId(0)).expect("kerbal exists");
    assert!(kerbal_body.velocity.x > 0.0);
}

#[test]
fn boots_off_leave_the_world_alone() {
    let (mut world, kerbal, _) = eva_scene(Vec3::new(1.0, 0.0, 0.0));
    let mut boots = MagneticBoots::default();
    boots.attach();

    for _ in 0..10 {
        let input = wearer_input(&world, kerbal);
        assert!(boots.step(&input, &world).is_none());
        world.step(DT);
    }
    assert_eq!(world.stats().total_kinetic_energy, 0.0);

    boots.toggle();
    boots.on_crew_board(true);
    assert!(boots.step(&wearer_input(&world, kerbal), &world).is_none());
}

#[test]
fn stronger_boots_reach_further() {
    let (world, kerbal, _) = eva_scene(Vec3::new(3.0, 0.0, 0.0));
    let input = wearer_input(&world, kerbal);

    let mut boots = MagneticBoots::default();
    boots.attach();
    boots.toggle();

    let weak = boots.step(&input, &world).expect("boots are on");
    assert_eq!(weak.candidates, 0);
    assert_eq!(weak.total_on_wearer(), Vec3::ZERO);

    // sqrt(0.5 / 0.05) > 3
    boots.set_strength(0.5).expect("on the slider");
    let strong = boots.step(&input, &world).expect("boots are on");
    assert_eq!(strong.candidates, 1);
    assert!(strong.estimated_range > 3.0);
    assert!(strong.total_on_wearer().x > 0.0);
}
