// Background asset loading
//
// Each request decodes on its own thread. Completions queue up on a channel
// and are drained by the frame loop, so results arrive at an arbitrary later
// frame and in no particular order.

use super::{AssetError, AssetId, AssetLoader, AssetType, LoadedAsset};
use log::{debug, warn};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

/// A finished load, successful or not
#[derive(Debug)]
pub struct LoadEvent {
    pub id: AssetId,
    pub asset_type: AssetType,
    pub name: String,
    pub result: Result<LoadedAsset, AssetError>,
}

/// Non-blocking front end over `AssetLoader`
pub struct AsyncLoader {
    loader: AssetLoader,
    sender: Sender<LoadEvent>,
    receiver: Receiver<LoadEvent>,
    in_flight: usize,
}

impl AsyncLoader {
    pub fn new(loader: AssetLoader) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            loader,
            sender,
            receiver,
            in_flight: 0,
        }
    }

    /// Start loading an asset in the background
    pub fn request(&mut self, asset_type: AssetType, name: &str) -> AssetId {
        let id = self.loader.asset_id(asset_type, name);
        let loader = self.loader.clone();
        let sender = self.sender.clone();
        let owned_name = name.to_string();

        debug!("Requesting {:?} asset {} ({:016x})", asset_type, name, id.as_u64());
        self.in_flight += 1;

        let spawned = thread::Builder::new()
            .name(format!("load {}", name))
            .spawn(move || {
                let result = loader.load(asset_type, &owned_name);
                // The receiver only goes away on shutdown
                let _ = sender.send(LoadEvent {
                    id,
                    asset_type,
                    name: owned_name,
                    result,
                });
            });

        if let Err(e) = spawned {
            self.report_spawn_failure(id, asset_type, name, e);
        }

        id
    }

    /// Complete a request whose thread never started, so it still reports back
    fn report_spawn_failure(
        &self,
        id: AssetId,
        asset_type: AssetType,
        name: &str,
        error: std::io::Error,
    ) {
        warn!("No loader thread for {}: {}", name, error);
        let _ = self.sender.send(LoadEvent {
            id,
            asset_type,
            name: name.to_string(),
            result: Err(AssetError::WorkerSpawn(error)),
        });
    }

    /// Collect every load that has finished since the last poll
    pub fn poll(&mut self) -> Vec<LoadEvent> {
        let events: Vec<LoadEvent> = self.receiver.try_iter().collect();
        self.in_flight = self.in_flight.saturating_sub(events.len());
        events
    }

    /// Number of requests that have not reported back yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight == 0
    }

    pub fn loader(&self) -> &AssetLoader {
        &self.loader
    }
}
