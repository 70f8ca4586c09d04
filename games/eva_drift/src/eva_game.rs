use glam::Vec3;
use magboots::{
    debug_print,
    engine::{Body, Container, ContainerId, GridConfig, PhysicsWorld, SpatialGrid},
    BootsConfig, BootsInput, Contact, Feet, MagneticBoots,
};
use rand::Rng;

/// Anything closer than this to the kerbal's centre counts as touching
const CONTACT_RADIUS: f32 = 0.45;
/// Hip to sole
const LEG_LENGTH: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaGameState {
    InsideVessel,
    OnEva,
    Boarded,
}

pub struct EvaDriftGame {
    game_state: EvaGameState,
    world: PhysicsWorld,
    boots: MagneticBoots,
    kerbal: Option<ContainerId>,
    station: Option<ContainerId>,
    elapsed: f32,
    hud_timer: f32,
    grounded_steps: u32,
    total_steps: u32,
}

impl EvaDriftGame {
    pub fn new(config: BootsConfig) -> magboots::Result<Self> {
        Ok(Self {
            game_state: EvaGameState::InsideVessel,
            world: PhysicsWorld::new(),
            boots: MagneticBoots::new(config)?,
            kerbal: None,
            station: None,
            elapsed: 0.0,
            hud_timer: 0.0,
            grounded_steps: 0,
            total_steps: 0,
        })
    }

    /// Station hull plates in a line along x, a short hop from the hatch
    fn add_station(&mut self) {
        let mut station = Container::new("station");
        for i in 0..6 {
            let plate_at = Vec3::new(i as f32 * 0.8 - 2.0, -1.1, 0.0);
            station = station.with_body(Body::new(plate_at, 500.0));
        }
        self.station = Some(self.world.add_container(station));
    }

    fn add_debris(&mut self, count: usize) {
        let mut rng = rand::rng();

        for _ in 0..count {
            let position = Vec3::new(
                rng.random_range(-3000.0..3000.0),
                rng.random_range(-3000.0..3000.0),
                rng.random_range(-300.0..300.0),
            );
            let drift = Vec3::new(
                rng.random_range(-0.5..0.5),
                rng.random_range(-0.5..0.5),
                rng.random_range(-0.5..0.5),
            );
            let mass = rng.random_range(0.2..3.0);

            let debris = Container::new("debris")
                .with_body(Body::new(position, mass).with_velocity(drift));
            self.world.add_container(debris);
        }
    }

    fn spawn_kerbal(&mut self) {
        let kerbal = Container::new("kerbal").with_body(Body::new(Vec3::new(0.0, 0.2, 0.0), 0.09));
        self.kerbal = Some(self.world.add_container(kerbal));
    }

    pub fn init(&mut self) {
        self.add_station();
        self.add_debris(200);

        debug_print!("Game initialized!");
        debug_print!("Containers: {}", self.world.stats().total_containers);
    }

    fn kerbal_position(&self) -> Option<Vec3> {
        let kerbal = self.world.get_container(self.kerbal?)?;
        kerbal.bodies.first().map(|b| b.position)
    }

    /// Closest body the kerbal is touching, if any
    fn find_contact(&self, position: Vec3) -> Option<Contact> {
        self.world
            .containers()
            .iter()
            .filter(|c| Some(c.id) != self.kerbal)
            .flat_map(|c| c.bodies.iter().map(move |b| (c.id, b)))
            .map(|(container, body)| (container, body, position.distance(body.position)))
            .filter(|(_, _, distance)| *distance < CONTACT_RADIUS)
            .min_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(container, body, _)| {
                let normal = (position - body.position).normalize_or_zero();
                Contact {
                    container,
                    body: body.id,
                    point: position - normal * LEG_LENGTH,
                    normal,
                }
            })
    }

    fn step_boots(&mut self, kerbal: ContainerId, position: Vec3) {
        let kerbal_body = self
            .world
            .get_container(kerbal)
            .and_then(|c| c.bodies.first())
            .map(|b| b.id);
        let Some(kerbal_body) = kerbal_body else {
            return;
        };

        let feet = Feet::new(
            position + Vec3::new(-0.08, -LEG_LENGTH, 0.0),
            position + Vec3::new(0.08, -LEG_LENGTH, 0.0),
        );
        let mut input = BootsInput::new(position, feet).with_own_container(kerbal);
        if let Some(contact) = self.find_contact(position) {
            input = input.with_contact(contact);
        }

        let forces = {
            let grid = SpatialGrid::build(self.world.containers(), GridConfig::default());
            self.boots.step(&input, &grid)
        };

        if let Some(forces) = forces {
            if forces.grounded {
                self.grounded_steps += 1;
            }
            self.world.apply_boots_forces((kerbal, kerbal_body), &forces);
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        self.total_steps += 1;

        match self.game_state {
            EvaGameState::InsideVessel => {
                if self.elapsed >= 0.5 {
                    self.spawn_kerbal();
                    self.boots.on_crew_eva(true);
                    self.boots.toggle();
                    self.game_state = EvaGameState::OnEva;
                }
            }
            EvaGameState::OnEva => {
                if let (Some(kerbal), Some(position)) = (self.kerbal, self.kerbal_position()) {
                    self.step_boots(kerbal, position);
                }

                if self.elapsed >= 10.0 {
                    self.boots.on_crew_board(true);
                    if let Some(kerbal) = self.kerbal.take() {
                        self.world.remove_container(kerbal);
                    }
                    self.game_state = EvaGameState::Boarded;
                }
            }
            EvaGameState::Boarded => {}
        }

        self.world.step(dt);

        self.hud_timer += dt;
        if self.hud_timer >= 1.0 {
            self.hud_timer = 0.0;
            debug_print!(
                "t={:.1}s state={:?} kerbal={:?} range={:.2}m",
                self.elapsed,
                self.game_state,
                self.kerbal_position(),
                self.boots.estimated_range()
            );
        }
    }

    pub fn print_summary(&self) {
        let stats = self.world.stats();
        println!("EVA drift finished after {:.1}s", self.elapsed);
        println!("  state:           {:?}", self.game_state);
        println!("  containers:      {}", stats.total_containers);
        println!("  grounded steps:  {} / {}", self.grounded_steps, self.total_steps);
        println!("  kinetic energy:  {:.4}", stats.total_kinetic_energy);
        if let Some(station) = self.station.and_then(|id| self.world.get_container(id)) {
            println!("  station at:      {:?}", station.position);
        }
    }
}
