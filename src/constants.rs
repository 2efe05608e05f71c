/// Games scheduled between every pair when no matrix is given
pub const DEFAULT_GAMES_PER_MATCHUP: u32 = 2;

/// Weeks a league runs for when the configuration doesn't say
pub const DEFAULT_NUM_WEEKS: usize = 6;

/// Fewest teams a league can be scheduled with
pub const MIN_TEAMS: usize = 2;

/// Divisor applied to a team's row index to form the fractional tie-break.
///
/// Rosters must stay below this many teams so the fraction never reaches a
/// whole win.
pub const TIE_BREAK_DIVISOR: f64 = 10000.0;

/// Marker written on the diagonal of the matchup matrix
pub const DIAGONAL_MARKER: &str = "-";

/// Days between consecutive week sheets
pub const DAYS_PER_WEEK: i64 = 7;

/// League name used when the configuration leaves it blank
pub const DEFAULT_LEAGUE_NAME: &str = "New League";
