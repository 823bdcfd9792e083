use blockview_kernel::InventorySlot;
use blockview_session::{GameSession, Phase};
use serde::Serialize;

/// Session inspector for the HUD and developer tooling.
///
/// Provides read-only snapshots of the state the HUD collaborators draw.
pub struct HudInspector;

impl HudInspector {
    /// Capture what the HUD shows right now.
    pub fn snapshot(session: &GameSession) -> HudSnapshot {
        let camera = session.pose().position;
        HudSnapshot {
            health: session.health(),
            inventory: session.world().inventory().slots().to_vec(),
            selected_slot: session.selected_slot(),
            mob_count: session.mobs().len(),
            block_count: session.world().block_count(),
            camera_x: camera.x,
            camera_z: camera.z,
        }
    }

    /// Broader state for logs and the CLI.
    pub fn summary(session: &GameSession) -> SessionSummary {
        SessionSummary {
            phase: session.phase(),
            seed: session.seed(),
            block_count: session.world().block_count(),
            pending_events: session.world().events().len(),
            state_hash: session.world().state_hash(),
        }
    }
}

/// Everything the HUD reads from the core.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub health: i32,
    pub inventory: Vec<InventorySlot>,
    pub selected_slot: usize,
    pub mob_count: usize,
    pub block_count: usize,
    pub camera_x: f32,
    pub camera_z: f32,
}

impl HudSnapshot {
    /// The slot the player has selected, if it exists.
    pub fn selected(&self) -> Option<&InventorySlot> {
        self.inventory.get(self.selected_slot)
    }
}

impl std::fmt::Display for HudSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Health: {}", self.health)?;
        write!(f, "Inventory:")?;
        for (i, slot) in self.inventory.iter().enumerate() {
            let marker = if i == self.selected_slot { "*" } else { "" };
            write!(f, " {marker}{}={}", slot.kind, slot.count)?;
        }
        writeln!(f)?;
        writeln!(f, "Blocks: {}", self.block_count)?;
        writeln!(f, "Mobs: {}", self.mob_count)?;
        write!(f, "X: {:.1} Z: {:.1}", self.camera_x, self.camera_z)
    }
}

#[derive(Debug, Clone)]
pub struct SessionSummary {
    pub phase: Phase,
    pub seed: u64,
    pub block_count: usize,
    pub pending_events: usize,
    pub state_hash: u64,
}

impl std::fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Session: phase={:?} seed={} blocks={} pending_events={} hash={:016x}",
            self.phase, self.seed, self.block_count, self.pending_events, self.state_hash
        )
    }
}
