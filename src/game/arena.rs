// Scene context: owns the ring, the fighters and their switcher

use std::collections::HashMap;

use glam::Vec3;
use log::{debug, error, info, warn};

use crate::engine::assets::{AssetId, AssetType, AsyncLoader, LoadEvent, LoadedAsset};

use super::characters::{ActionSwitcher, ActorId, ActorRoster, FighterSpec, TriggerOutcome, FIGHTERS};
use super::scene::{Placement, Scene, SceneNode};

pub const RING_MODEL: &str = "professional_boxing_ring_arena.glb";
pub const RING_PLACEMENT: Placement = Placement::new(Vec3::new(0.0, -1000.0, 0.0), 30.0);
pub const ENVIRONMENT_MAP: &str = "wrestling_gym_2k.hdr";

/// What a requested asset is for
#[derive(Debug, Clone, Copy)]
enum Pending {
    Ring,
    FighterModel {
        actor: ActorId,
        spec: &'static FighterSpec,
    },
    FighterMove {
        actor: ActorId,
        action: &'static str,
        clip_index: usize,
    },
    Environment,
}

/// The boxing ring and everything in it
#[derive(Debug)]
pub struct Arena {
    scene: Scene,
    actors: ActorRoster,
    switcher: ActionSwitcher,
    /// Outstanding requests; one file may feed several targets
    pending: HashMap<AssetId, Vec<Pending>>,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Arena {
    /// Lit ring with every fighter spawned, nothing loaded yet
    pub fn new() -> Self {
        let mut actors = ActorRoster::new();
        for fighter in FIGHTERS {
            actors.spawn(fighter.name, &fighter.move_names());
        }

        Self {
            scene: Scene::boxing_ring(),
            actors,
            switcher: ActionSwitcher::default(),
            pending: HashMap::new(),
        }
    }

    /// Request every asset the arena needs
    pub fn load_all(&mut self, loader: &mut AsyncLoader) {
        self.request(loader, AssetType::Model, RING_MODEL, Pending::Ring);

        for spec in FIGHTERS {
            let Some(actor) = self.actors.find(spec.name).map(|a| a.id) else {
                continue;
            };
            self.request(
                loader,
                AssetType::Model,
                spec.model,
                Pending::FighterModel { actor, spec },
            );
            for m in spec.moves {
                self.request(
                    loader,
                    AssetType::Model,
                    m.asset,
                    Pending::FighterMove {
                        actor,
                        action: m.name,
                        clip_index: m.clip_index,
                    },
                );
            }
        }

        self.request(
            loader,
            AssetType::Environment,
            ENVIRONMENT_MAP,
            Pending::Environment,
        );

        info!("Requested {} assets", self.pending_count());
    }

    fn request(
        &mut self,
        loader: &mut AsyncLoader,
        asset_type: AssetType,
        name: &str,
        target: Pending,
    ) {
        let id = loader.loader().asset_id(asset_type, name);
        let targets = self.pending.entry(id).or_default();
        if targets.is_empty() {
            loader.request(asset_type, name);
        }
        targets.push(target);
    }

    /// Route a finished load to whatever was waiting for it
    pub fn apply(&mut self, event: LoadEvent) {
        let Some(targets) = self.pending.remove(&event.id) else {
            warn!("Ignoring unrequested asset {}", event.name);
            return;
        };

        let asset = match event.result {
            Ok(asset) => asset,
            Err(e) => {
                error!(
                    "Failed to load {:?} asset {}: {}",
                    event.asset_type, event.name, e
                );
                return;
            }
        };

        match &asset {
            LoadedAsset::Model(model) => info!(
                "Loaded {} ({} meshes, {} nodes, {} clips)",
                event.name,
                model.mesh_count,
                model.node_count,
                model.clips.len()
            ),
            LoadedAsset::Environment(_) => info!("Loaded {}", event.name),
        }
        for target in targets {
            self.apply_target(target, &asset, &event.name);
        }
    }

    fn apply_target(&mut self, target: Pending, asset: &LoadedAsset, name: &str) {
        match (target, asset) {
            (Pending::Ring, LoadedAsset::Model(_)) => {
                self.scene
                    .add_node(SceneNode::shadowed("ring", RING_PLACEMENT));
            }
            (Pending::FighterModel { actor, spec }, LoadedAsset::Model(model)) => {
                let idle = model.clip(spec.idle_clip_index).cloned();
                if idle.is_none() {
                    warn!(
                        "{} has no clip {}; {} stays still",
                        name, spec.idle_clip_index, spec.name
                    );
                }
                self.scene
                    .add_node(SceneNode::shadowed(spec.name, spec.placement));
                if let Some(actor) = self.actors.get_mut(actor) {
                    actor.attach_model(idle);
                }
            }
            (
                Pending::FighterMove {
                    actor,
                    action,
                    clip_index,
                },
                LoadedAsset::Model(model),
            ) => {
                let Some(clip) = model.clip(clip_index) else {
                    warn!("{} has no clip {}; {} is disabled", name, clip_index, action);
                    return;
                };
                if let Some(actor) = self.actors.get_mut(actor) {
                    debug!(
                        "{}: {} is clip {} ({:.2}s)",
                        actor.name,
                        action,
                        clip.display_name(),
                        clip.duration
                    );
                    actor.set_one_shot_clip(action, clip.clone());
                }
            }
            (Pending::Environment, LoadedAsset::Environment(env)) => {
                info!("Environment map {}x{}", env.width, env.height);
                self.scene.set_environment(env.clone());
            }
            (target, _) => {
                warn!("{} is the wrong kind of asset for {:?}", name, target);
            }
        }
    }

    /// Play `action` on the actor. Anything other than `Started` changes nothing.
    pub fn handle_trigger(&mut self, actor: ActorId, action: &str) -> TriggerOutcome {
        let Some(target) = self.actors.get_mut(actor) else {
            debug!("Trigger {} for unknown actor {}", action, actor);
            return TriggerOutcome::UnknownAction;
        };

        let outcome = self.switcher.trigger(target, action);
        match (outcome, self.switcher.reversion_due(target)) {
            (TriggerOutcome::Started, Some(due)) => debug!(
                "{} plays {} at {:.2}s, back to idle at {:.2}s",
                target.name,
                action,
                self.switcher.now(),
                due
            ),
            (TriggerOutcome::Started, None) => {}
            _ => debug!("{}: {} ignored ({:?})", target.name, action, outcome),
        }
        outcome
    }

    /// Fire due reversions, then advance every mixer
    pub fn update(&mut self, dt: f32) {
        for id in self.switcher.advance(dt, &mut self.actors) {
            if let Some(actor) = self.actors.get(id) {
                debug!("{} back to idle", actor.name);
            }
        }
        self.actors.update(dt);
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn actors(&self) -> &ActorRoster {
        &self.actors
    }

    pub fn switcher(&self) -> &ActionSwitcher {
        &self.switcher
    }

    /// Number of requested files still outstanding
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn clear_color(&self) -> [f32; 3] {
        self.scene.clear_color()
    }
}

#[cfg(test)]
impl Arena {
    pub fn actor(&self, id: ActorId) -> Option<&super::characters::actor::Actor> {
        self.actors.get(id)
    }

    /// Cross-fade the actor back to idle now
    pub fn revert_to_idle(&mut self, actor: ActorId) -> bool {
        match self.actors.get_mut(actor) {
            Some(actor) => self.switcher.revert_to_idle(actor),
            None => false,
        }
    }
}
