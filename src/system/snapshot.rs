/// One process as seen in a single sampling pass. Samples are rebuilt from
/// scratch every pass; there is no identity tracking across passes.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessSample {
    pub pid: u32,
    /// Best-effort display name; empty when the OS denies access.
    pub name: String,
    /// Instantaneous CPU since the previous refresh, up to 100 per core.
    pub cpu_percent: f32,
    /// Resident set size.
    pub memory_bytes: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MemoryStats {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub used_percent: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlobalStats {
    pub cpu_percent: f32,
    pub memory: MemoryStats,
}
