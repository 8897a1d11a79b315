/// Simulation constants. All durations are milliseconds on the session clock;
/// distances are in arena units.
#[derive(Clone, Debug, PartialEq)]
pub struct Tuning {
    pub movement_tick_ms: u64,
    pub enemy_ai_tick_ms: u64,
    pub enemy_strike_tick_ms: u64,
    pub zone_tick_ms: u64,
    pub step: f32,
    pub boost_multiplier: f32,
    pub chase_proximity: f32,
    pub idle_drift: f32,
    pub integration_fraction: f32,
    pub interact_radius: f32,
    pub strike_offset: f32,
    pub hazard_damage: u32,
    pub heal_amount: u32,
    pub respawn_health: u32,
    pub respawn_delay_ms: u64,
    pub attack_pose_ms: u64,
    pub slash_ms: u64,
    pub hit_flash_ms: u64,
    pub notification_ms: u64,
    pub defeat_reward: Reward,
    pub clear_reward: Reward,
    pub player_max_health: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reward {
    pub xp: u32,
    pub coins: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            movement_tick_ms: 16,
            enemy_ai_tick_ms: 420,
            enemy_strike_tick_ms: 120,
            zone_tick_ms: 500,
            step: 2.2,
            boost_multiplier: 1.45,
            chase_proximity: 24.0,
            idle_drift: 0.25,
            integration_fraction: 0.02,
            interact_radius: 12.0,
            strike_offset: 12.0,
            hazard_damage: 4,
            heal_amount: 3,
            respawn_health: 70,
            respawn_delay_ms: 600,
            attack_pose_ms: 170,
            slash_ms: 150,
            hit_flash_ms: 180,
            notification_ms: 2200,
            defeat_reward: Reward { xp: 1, coins: 1 },
            clear_reward: Reward { xp: 2, coins: 2 },
            player_max_health: 100,
        }
    }
}
