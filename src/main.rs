//! Coyote Jump - headless demo
//!
//! Runs a scripted jumper across seeded, procedurally generated platforms and
//! prints a session summary as JSON.
//!
//! Usage: `coyote-jump [TUNING.json] [--preset NAME] [--seed N] [--seconds S]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Coyote Jump (native) starting...");

    if let Err(e) = demo::run(std::env::args().skip(1)) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The demo is native only; the library works on any target
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::path::PathBuf;

    use coyote_jump::consts::SIM_DT;
    use coyote_jump::sim::{
        Body, JumpControls, JumpController, JumpEvent, Platform, PlatformBody, PressLatch,
    };
    use coyote_jump::{FixedStepper, GameSession, JumpError, JumpPreset, JumpTuning};
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;
    use serde::Serialize;
    use thiserror::Error;

    const RUN_SPEED: f32 = 6.0;
    const KILL_Y: f32 = -12.0;
    const FRAME_DT: f32 = 1.0 / 60.0;
    const PAUSE_AT: f32 = 5.0;
    const PAUSE_FOR: f32 = 1.0;

    #[derive(Debug, Error)]
    pub enum DemoError {
        #[error(transparent)]
        Jump(#[from] JumpError),
        #[error("{0}")]
        Usage(String),
        #[error("failed to write summary: {0}")]
        Summary(#[from] serde_json::Error),
    }

    #[derive(Debug)]
    struct Args {
        tuning_path: Option<PathBuf>,
        preset: Option<JumpPreset>,
        seed: u64,
        seconds: f32,
    }

    impl Args {
        fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, DemoError> {
            let mut parsed = Args {
                tuning_path: None,
                preset: None,
                seed: 12345,
                seconds: 20.0,
            };

            while let Some(arg) = args.next() {
                let mut value = |flag: &str| {
                    args.next()
                        .ok_or_else(|| DemoError::Usage(format!("{} needs a value", flag)))
                };
                match arg.as_str() {
                    "--preset" => {
                        let name = value("--preset")?;
                        parsed.preset = Some(JumpPreset::from_str(&name).ok_or_else(|| {
                            DemoError::Usage(format!("unknown preset '{}'", name))
                        })?);
                    }
                    "--seed" => {
                        let raw = value("--seed")?;
                        parsed.seed = raw
                            .parse()
                            .map_err(|_| DemoError::Usage(format!("bad seed '{}'", raw)))?;
                    }
                    "--seconds" => {
                        let raw = value("--seconds")?;
                        parsed.seconds = raw
                            .parse::<f32>()
                            .ok()
                            .filter(|s| s.is_finite() && *s > 0.0)
                            .ok_or_else(|| DemoError::Usage(format!("bad duration '{}'", raw)))?;
                    }
                    flag if flag.starts_with("--") => {
                        return Err(DemoError::Usage(format!("unknown flag '{}'", flag)));
                    }
                    path => parsed.tuning_path = Some(PathBuf::from(path)),
                }
            }
            Ok(parsed)
        }

        fn tuning(&self) -> Result<JumpTuning, DemoError> {
            match (&self.tuning_path, self.preset) {
                (Some(path), _) => Ok(JumpTuning::load(path)?),
                (None, Some(preset)) => {
                    log::info!("Using {} preset", preset.as_str());
                    Ok(preset.tuning())
                }
                (None, None) => Ok(JumpTuning::default()),
            }
        }
    }

    /// Seeded level: a starting slab, then platforms separated by gaps
    fn generate_level(rng: &mut Pcg32, length: f32) -> Vec<Platform> {
        let mut platforms = vec![Platform::new(-2.0, 8.0, 0.0)];
        let mut x = 8.0;
        let mut top = 0.0_f32;
        while x < length {
            let gap = rng.random_range(1.5..3.5);
            let width = rng.random_range(3.0..8.0);
            top = (top + rng.random_range(-1.5..1.5)).clamp(-2.0, 3.0);
            platforms.push(Platform::new(x + gap, x + gap + width, top));
            x += gap + width;
        }
        platforms
    }

    /// Scripted player: presses somewhere around each ledge, sometimes late
    struct JumpBot {
        rng: Pcg32,
        platform: Option<usize>,
        pressed_for: Option<usize>,
        trigger_x: f32,
        hold_left: f32,
    }

    impl JumpBot {
        fn new(seed: u64) -> Self {
            Self {
                rng: Pcg32::seed_from_u64(seed ^ 0x9e37_79b9),
                platform: None,
                pressed_for: None,
                trigger_x: f32::INFINITY,
                hold_left: 0.0,
            }
        }

        fn reset(&mut self) {
            self.platform = None;
            self.pressed_for = None;
            self.trigger_x = f32::INFINITY;
            self.hold_left = 0.0;
        }

        fn controls(&mut self, body: &PlatformBody, frame_dt: f32) -> JumpControls {
            if let Some(i) = body.support_index() {
                if self.platform != Some(i) {
                    self.platform = Some(i);
                    self.trigger_x = body.platforms[i].max_x + self.rng.random_range(-0.8..0.6);
                }
            }

            let mut pressed = false;
            if let Some(i) = self.platform {
                if self.pressed_for != Some(i) && body.pos.x >= self.trigger_x {
                    pressed = true;
                    self.pressed_for = Some(i);
                    self.hold_left = self.rng.random_range(0.08..0.4);
                }
            }

            let held = pressed || self.hold_left > 0.0;
            self.hold_left = (self.hold_left - frame_dt).max(0.0);
            JumpControls { pressed, held }
        }
    }

    #[derive(Debug, Serialize)]
    struct Summary {
        seed: u64,
        tuning: JumpTuning,
        session: GameSession,
        distance: f32,
        ticks: u64,
        coyote_jumps: u32,
        wall_seconds: f32,
    }

    pub fn run(args: impl Iterator<Item = String>) -> Result<(), DemoError> {
        let args = Args::parse(args)?;
        let tuning = args.tuning()?;
        log::info!("Seed {}, running for {}s", args.seed, args.seconds);

        let mut rng = Pcg32::seed_from_u64(args.seed);
        let platforms = generate_level(&mut rng, RUN_SPEED * args.seconds + 20.0);
        log::info!("Generated {} platforms", platforms.len());

        let mut body = PlatformBody::new(Vec2::new(0.0, 0.0), tuning.gravity_y, platforms);
        body.vel.x = RUN_SPEED;

        let mut controller = JumpController::initialize(tuning, Some(body))?;
        let mut session = GameSession::default();
        let mut stepper = FixedStepper::new(SIM_DT);
        let mut bot = JumpBot::new(args.seed);
        let mut latch = PressLatch::new();
        let mut checkpoint = Vec2::ZERO;
        let mut coyote_jumps = 0;
        let mut wall = 0.0_f32;

        while wall < args.seconds && !session.is_over() {
            let frame_dt = FRAME_DT * rng.random_range(0.8..1.2);
            wall += frame_dt;

            if (PAUSE_AT..PAUSE_AT + PAUSE_FOR).contains(&wall) {
                session.pause();
            } else {
                session.resume();
            }

            latch.sample(if session.is_paused() {
                JumpControls::idle()
            } else {
                bot.controls(controller.body(), frame_dt)
            });

            stepper.advance(frame_dt * session.time_scale(), |_, dt| {
                if let Some(report) = controller.step(latch.take(), dt).report() {
                    for event in &report.events {
                        match *event {
                            JumpEvent::Fired { from_coyote, .. } => {
                                session.record_jump();
                                session.add_score(1);
                                if from_coyote {
                                    coyote_jumps += 1;
                                }
                            }
                            JumpEvent::Landed { .. } => session.add_score(5),
                            JumpEvent::LeftGround { .. } => {}
                        }
                        log::debug!("{:?}", event);
                    }
                }
                controller.body_mut().integrate(dt);
            });

            if let Some(p) = controller.body().support() {
                checkpoint = Vec2::new(p.min_x + 0.5, p.top);
            }

            if controller.body().pos.y < KILL_Y {
                if session.lose_life() {
                    break;
                }
                let body = controller.body_mut();
                body.teleport(checkpoint);
                body.set_velocity(Vec2::new(RUN_SPEED, 0.0));
                controller.reset();
                latch.clear();
                stepper.reset();
                bot.reset();
            }
        }

        let distance = controller.body().pos.x;
        session.add_score(distance.max(0.0) as u64);
        let ticks = stepper.ticks();
        let summary = Summary {
            seed: args.seed,
            tuning: controller.tuning().clone(),
            session,
            distance,
            ticks,
            coyote_jumps,
            wall_seconds: wall,
        };
        log::info!(
            "Finished: score={}, jumps={}, distance={:.1}",
            summary.session.score,
            summary.session.jumps,
            distance
        );
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }

}
