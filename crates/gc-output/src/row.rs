//! Plain data row types written by output backends.

/// One agent's cell in one recorded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentFrameRow {
    pub tick:            u64,
    pub agent_id:        u32,
    pub row:             i32,
    pub col:             i32,
    /// Cells left on the agent's cached route (0 when idle).
    pub route_remaining: u64,
}

/// Summary of one recorded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:       u64,
    pub player_row: i32,
    pub player_col: i32,
    pub agents:     u64,
    /// Searches run during the tick.
    pub replans:    u64,
}
