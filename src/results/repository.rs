use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::models::{
    round2, HeadToHead, LeaderboardEntry, LuckyPlayer, NewResult, PlayerAverage, PlayerGames,
    PlayerStats, ResultRecord, StoreSummary, StreakInfo, WeekdayWinner, WEEKDAYS,
};
use crate::announcement::{DATE_FORMAT, FAIL_SCORE};
use crate::shared::AppError;

/// Upper bound of results per day assumed by [`ResultRepository::recent_results`].
pub const RESULTS_PER_DAY: i64 = 10;

/// Storage for parsed results and the aggregate queries read from it.
///
/// `(date, player_name)` is unique: saving the same player twice for a day
/// returns `Ok(false)` instead of an error.
#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// Creates tables and indexes. Called once by the host process.
    async fn init(&self) -> Result<(), AppError>;
    async fn save_result(&self, result: &NewResult) -> Result<bool, AppError>;
    async fn leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, AppError>;
    async fn player_stats(&self, player_name: &str) -> Result<Option<PlayerStats>, AppError>;
    async fn player_averages(&self) -> Result<Vec<PlayerAverage>, AppError>;
    async fn recent_results(&self, days: u32) -> Result<Vec<ResultRecord>, AppError>;
    async fn head_to_head(
        &self,
        player1: &str,
        player2: &str,
    ) -> Result<Option<HeadToHead>, AppError>;
    async fn streak_info(&self) -> Result<StreakInfo, AppError>;
    async fn lucky_players(&self) -> Result<Vec<LuckyPlayer>, AppError>;
    async fn weekday_winners(&self) -> Result<Vec<WeekdayWinner>, AppError>;
    async fn summary(&self) -> Result<StoreSummary, AppError>;
    async fn players(&self) -> Result<Vec<PlayerGames>, AppError>;
}

/// Picks the top player per weekday from `(weekday index, player, wins)`
/// rows, Monday = 0. Ties go to the alphabetically first name.
fn top_per_weekday(rows: Vec<(u32, String, i64)>) -> Vec<WeekdayWinner> {
    let mut best: [Option<(String, i64)>; 7] = Default::default();

    for (weekday, player_name, wins) in rows {
        let Some(slot) = best.get_mut(weekday as usize) else {
            continue;
        };
        let better = match slot {
            Some((name, top)) => wins > *top || (wins == *top && player_name < *name),
            None => true,
        };
        if better {
            *slot = Some((player_name, wins));
        }
    }

    best.into_iter()
        .enumerate()
        .filter_map(|(index, slot)| {
            slot.map(|(player_name, wins)| WeekdayWinner {
                weekday: WEEKDAYS[index].to_string(),
                player_name,
                wins,
            })
        })
        .collect()
}

/// Sorts `(name, count)` pairs by count descending, then name.
fn ranked<T>(counts: HashMap<String, i64>, build: impl Fn(String, i64) -> T) -> Vec<T> {
    let mut pairs: Vec<(String, i64)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    pairs.into_iter().map(|(name, count)| build(name, count)).collect()
}

/// In-memory implementation of ResultRepository for development and testing
///
/// Data is lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryResultRepository {
    records: RwLock<Vec<ResultRecord>>,
}

impl InMemoryResultRepository {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    pub async fn result_count(&self) -> usize {
        self.records.read().await.len()
    }

    async fn games_for(&self, player_name: &str) -> Vec<(i32, bool)> {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| r.player_name == player_name)
            .map(|r| (r.score, r.is_winner))
            .collect()
    }
}

#[async_trait]
impl ResultRepository for InMemoryResultRepository {
    async fn init(&self) -> Result<(), AppError> {
        debug!("In-memory result store needs no schema");
        Ok(())
    }

    #[instrument(skip(self, result), fields(date = %result.date, player_name = %result.player_name))]
    async fn save_result(&self, result: &NewResult) -> Result<bool, AppError> {
        let mut records = self.records.write().await;

        if records
            .iter()
            .any(|r| r.date == result.date && r.player_name == result.player_name)
        {
            debug!("Duplicate result in memory");
            return Ok(false);
        }

        let id = records.len() as i64 + 1;
        records.push(ResultRecord {
            id,
            date: result.date.clone(),
            puzzle_number: result.puzzle_number,
            player_name: result.player_name.clone(),
            player_id: result.player_id.clone(),
            score: result.score,
            is_winner: result.is_winner,
            streak_day: result.streak_day,
            created_at: Utc::now(),
        });

        debug!(id, "Result saved in memory");
        Ok(true)
    }

    async fn leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, AppError> {
        let mut wins: HashMap<String, i64> = HashMap::new();
        for record in self.records.read().await.iter().filter(|r| r.is_winner) {
            *wins.entry(record.player_name.clone()).or_default() += 1;
        }

        let mut entries = ranked(wins, |player_name, wins| LeaderboardEntry { player_name, wins });
        entries.truncate(limit as usize);
        Ok(entries)
    }

    async fn player_stats(&self, player_name: &str) -> Result<Option<PlayerStats>, AppError> {
        let games = self.games_for(player_name).await;
        Ok(PlayerStats::from_games(player_name, &games))
    }

    async fn player_averages(&self) -> Result<Vec<PlayerAverage>, AppError> {
        let mut per_player: HashMap<String, (i64, i64, i64)> = HashMap::new(); // games, solved, sum
        for record in self.records.read().await.iter() {
            let entry = per_player.entry(record.player_name.clone()).or_default();
            entry.0 += 1;
            if record.score < i32::from(FAIL_SCORE) {
                entry.1 += 1;
                entry.2 += i64::from(record.score);
            }
        }

        let mut averages: Vec<PlayerAverage> = per_player
            .into_iter()
            .map(|(player_name, (games, solved, sum))| PlayerAverage {
                player_name,
                avg_score: (solved > 0).then(|| round2(sum as f64 / solved as f64)),
                game_count: games,
            })
            .collect();

        averages.sort_by(|a, b| match (a.avg_score, b.avg_score) {
            (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.player_name.cmp(&b.player_name)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.player_name.cmp(&b.player_name),
        });
        Ok(averages)
    }

    async fn recent_results(&self, days: u32) -> Result<Vec<ResultRecord>, AppError> {
        let mut records = self.records.read().await.clone();
        // Stable sort keeps insertion order within a day.
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records.truncate((i64::from(days) * RESULTS_PER_DAY) as usize);
        Ok(records)
    }

    async fn head_to_head(
        &self,
        player1: &str,
        player2: &str,
    ) -> Result<Option<HeadToHead>, AppError> {
        let (Some(p1_stats), Some(p2_stats)) = (
            self.player_stats(player1).await?,
            self.player_stats(player2).await?,
        ) else {
            return Ok(None);
        };

        let records = self.records.read().await;
        let p2_by_date: HashMap<&str, i32> = records
            .iter()
            .filter(|r| r.player_name == player2)
            .map(|r| (r.date.as_str(), r.score))
            .collect();
        let shared_days: Vec<(i32, i32)> = records
            .iter()
            .filter(|r| r.player_name == player1)
            .filter_map(|r| p2_by_date.get(r.date.as_str()).map(|p2| (r.score, *p2)))
            .collect();

        Ok(Some(HeadToHead::tally(p1_stats, p2_stats, &shared_days)))
    }

    async fn streak_info(&self) -> Result<StreakInfo, AppError> {
        let records = self.records.read().await;

        // First record of the latest date, matching `ORDER BY date DESC, id ASC`.
        let current_streak = records
            .iter()
            .fold(None::<&ResultRecord>, |latest, r| match latest {
                Some(l) if l.date >= r.date => Some(l),
                _ => Some(r),
            })
            .map(|r| r.streak_day)
            .unwrap_or(0);
        let best_streak = records.iter().map(|r| r.streak_day).max().unwrap_or(0);

        Ok(StreakInfo {
            current_streak,
            best_streak,
        })
    }

    async fn lucky_players(&self) -> Result<Vec<LuckyPlayer>, AppError> {
        let mut lucky: HashMap<String, i64> = HashMap::new();
        for record in self
            .records
            .read()
            .await
            .iter()
            .filter(|r| matches!(r.score, 1 | 2))
        {
            *lucky.entry(record.player_name.clone()).or_default() += 1;
        }

        Ok(ranked(lucky, |player_name, lucky_count| LuckyPlayer {
            player_name,
            lucky_count,
        }))
    }

    async fn weekday_winners(&self) -> Result<Vec<WeekdayWinner>, AppError> {
        let mut wins: HashMap<(u32, String), i64> = HashMap::new();
        for record in self.records.read().await.iter().filter(|r| r.is_winner) {
            let Ok(date) = NaiveDate::parse_from_str(&record.date, DATE_FORMAT) else {
                warn!(date = %record.date, "Skipping result with unparsable date");
                continue;
            };
            let weekday = date.weekday().num_days_from_monday();
            *wins.entry((weekday, record.player_name.clone())).or_default() += 1;
        }

        let rows = wins
            .into_iter()
            .map(|((weekday, player_name), count)| (weekday, player_name, count))
            .collect();
        Ok(top_per_weekday(rows))
    }

    async fn summary(&self) -> Result<StoreSummary, AppError> {
        let records = self.records.read().await;

        let mut players: Vec<&str> = records.iter().map(|r| r.player_name.as_str()).collect();
        players.sort_unstable();
        players.dedup();
        let mut dates: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
        dates.sort_unstable();
        dates.dedup();

        Ok(StoreSummary {
            total_results: records.len() as i64,
            unique_players: players.len() as i64,
            days_tracked: dates.len() as i64,
            first_date: dates.first().map(|d| d.to_string()),
            last_date: dates.last().map(|d| d.to_string()),
        })
    }

    async fn players(&self) -> Result<Vec<PlayerGames>, AppError> {
        let mut games: HashMap<String, i64> = HashMap::new();
        for record in self.records.read().await.iter() {
            *games.entry(record.player_name.clone()).or_default() += 1;
        }

        Ok(ranked(games, |player_name, games| PlayerGames {
            player_name,
            games,
        }))
    }
}

/// PostgreSQL implementation of result repository
pub struct PostgresResultRepository {
    pool: PgPool,
}

impl PostgresResultRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SCHEMA: [&str; 4] = [
    r#"CREATE TABLE IF NOT EXISTS results (
        id BIGSERIAL PRIMARY KEY,
        date TEXT NOT NULL,
        puzzle_number INTEGER,
        player_name TEXT NOT NULL,
        player_id TEXT,
        score INTEGER NOT NULL,
        is_winner BOOLEAN NOT NULL DEFAULT FALSE,
        streak_day INTEGER NOT NULL DEFAULT 0,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        UNIQUE (date, player_name)
    )"#,
    "CREATE INDEX IF NOT EXISTS idx_results_date ON results(date)",
    "CREATE INDEX IF NOT EXISTS idx_results_player_name ON results(player_name)",
    "CREATE INDEX IF NOT EXISTS idx_results_is_winner ON results(is_winner)",
];

fn database_error(e: sqlx::Error) -> AppError {
    warn!(error = %e, "Results query failed");
    AppError::DatabaseError(e.to_string())
}

#[async_trait]
impl ResultRepository for PostgresResultRepository {
    #[instrument(skip(self))]
    async fn init(&self) -> Result<(), AppError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(database_error)?;
        }

        info!("Results schema ready");
        Ok(())
    }

    #[instrument(skip(self, result), fields(date = %result.date, player_name = %result.player_name))]
    async fn save_result(&self, result: &NewResult) -> Result<bool, AppError> {
        let outcome = sqlx::query(
            "INSERT INTO results (date, player_name, score, is_winner, streak_day, player_id, puzzle_number) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (date, player_name) DO NOTHING",
        )
        .bind(&result.date)
        .bind(&result.player_name)
        .bind(result.score)
        .bind(result.is_winner)
        .bind(result.streak_day)
        .bind(&result.player_id)
        .bind(result.puzzle_number)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        let saved = outcome.rows_affected() == 1;
        debug!(saved, "Result insert finished");
        Ok(saved)
    }

    #[instrument(skip(self))]
    async fn leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, AppError> {
        sqlx::query_as::<_, LeaderboardEntry>(
            "SELECT player_name, COUNT(*) AS wins FROM results \
             WHERE is_winner \
             GROUP BY player_name \
             ORDER BY wins DESC, player_name ASC \
             LIMIT $1",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)
    }

    #[instrument(skip(self))]
    async fn player_stats(&self, player_name: &str) -> Result<Option<PlayerStats>, AppError> {
        let games = sqlx::query_as::<_, (i32, bool)>(
            "SELECT score, is_winner FROM results WHERE player_name = $1",
        )
        .bind(player_name)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(PlayerStats::from_games(player_name, &games))
    }

    #[instrument(skip(self))]
    async fn player_averages(&self) -> Result<Vec<PlayerAverage>, AppError> {
        sqlx::query_as::<_, PlayerAverage>(
            "SELECT player_name, \
                    ROUND(AVG(score) FILTER (WHERE score < 7), 2)::FLOAT8 AS avg_score, \
                    COUNT(*) AS game_count \
             FROM results \
             GROUP BY player_name \
             ORDER BY avg_score ASC NULLS LAST, player_name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)
    }

    #[instrument(skip(self))]
    async fn recent_results(&self, days: u32) -> Result<Vec<ResultRecord>, AppError> {
        sqlx::query_as::<_, ResultRecord>(
            "SELECT id, date, puzzle_number, player_name, player_id, score, is_winner, streak_day, created_at \
             FROM results \
             ORDER BY date DESC, id ASC \
             LIMIT $1",
        )
        .bind(i64::from(days) * RESULTS_PER_DAY)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)
    }

    #[instrument(skip(self))]
    async fn head_to_head(
        &self,
        player1: &str,
        player2: &str,
    ) -> Result<Option<HeadToHead>, AppError> {
        let (Some(p1_stats), Some(p2_stats)) = (
            self.player_stats(player1).await?,
            self.player_stats(player2).await?,
        ) else {
            return Ok(None);
        };

        let shared_days = sqlx::query_as::<_, (i32, i32)>(
            "SELECT r1.score, r2.score \
             FROM results r1 \
             INNER JOIN results r2 ON r1.date = r2.date \
             WHERE r1.player_name = $1 AND r2.player_name = $2",
        )
        .bind(player1)
        .bind(player2)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(Some(HeadToHead::tally(p1_stats, p2_stats, &shared_days)))
    }

    #[instrument(skip(self))]
    async fn streak_info(&self) -> Result<StreakInfo, AppError> {
        let current = sqlx::query_as::<_, (i32,)>(
            "SELECT streak_day FROM results ORDER BY date DESC, id ASC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        let (best,) = sqlx::query_as::<_, (Option<i32>,)>("SELECT MAX(streak_day) FROM results")
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(StreakInfo {
            current_streak: current.map(|(streak,)| streak).unwrap_or(0),
            best_streak: best.unwrap_or(0),
        })
    }

    #[instrument(skip(self))]
    async fn lucky_players(&self) -> Result<Vec<LuckyPlayer>, AppError> {
        sqlx::query_as::<_, LuckyPlayer>(
            "SELECT player_name, COUNT(*) AS lucky_count FROM results \
             WHERE score IN (1, 2) \
             GROUP BY player_name \
             ORDER BY lucky_count DESC, player_name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)
    }

    #[instrument(skip(self))]
    async fn weekday_winners(&self) -> Result<Vec<WeekdayWinner>, AppError> {
        // ISODOW runs 1 (Monday) to 7 (Sunday).
        let rows = sqlx::query_as::<_, (i32, String, i64)>(
            "SELECT EXTRACT(ISODOW FROM date::date)::INT4 AS weekday, player_name, COUNT(*) AS wins \
             FROM results \
             WHERE is_winner \
             GROUP BY 1, player_name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        let rows = rows
            .into_iter()
            .filter_map(|(iso, player_name, wins)| {
                u32::try_from(iso - 1).ok().map(|day| (day, player_name, wins))
            })
            .collect();
        Ok(top_per_weekday(rows))
    }

    #[instrument(skip(self))]
    async fn summary(&self) -> Result<StoreSummary, AppError> {
        let (total_results, unique_players, days_tracked, first_date, last_date) =
            sqlx::query_as::<_, (i64, i64, i64, Option<String>, Option<String>)>(
                "SELECT COUNT(*), COUNT(DISTINCT player_name), COUNT(DISTINCT date), MIN(date), MAX(date) \
                 FROM results",
            )
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(StoreSummary {
            total_results,
            unique_players,
            days_tracked,
            first_date,
            last_date,
        })
    }

    #[instrument(skip(self))]
    async fn players(&self) -> Result<Vec<PlayerGames>, AppError> {
        sqlx::query_as::<_, PlayerGames>(
            "SELECT player_name, COUNT(*) AS games FROM results \
             GROUP BY player_name \
             ORDER BY games DESC, player_name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test helper functions for creating test data
    mod helpers {
        use super::*;

        pub fn new_result(date: &str, player_name: &str, score: i32, is_winner: bool) -> NewResult {
            NewResult {
                date: date.to_string(),
                player_name: player_name.to_string(),
                player_id: None,
                score,
                is_winner,
                streak_day: 0,
                puzzle_number: None,
            }
        }

        pub fn with_streak(mut result: NewResult, streak_day: i32) -> NewResult {
            result.streak_day = streak_day;
            result
        }

        /// Three days: alice wins twice, bob once (Mon 2024-03-04 .. Wed 2024-03-06).
        pub async fn seeded_repo() -> InMemoryResultRepository {
            let repo = InMemoryResultRepository::new();
            let rows = vec![
                with_streak(new_result("2024-03-04", "alice", 3, true), 10),
                with_streak(new_result("2024-03-04", "bob", 4, false), 10),
                with_streak(new_result("2024-03-05", "alice", 2, true), 11),
                with_streak(new_result("2024-03-05", "bob", 7, false), 11),
                with_streak(new_result("2024-03-06", "bob", 1, true), 12),
                with_streak(new_result("2024-03-06", "carol", 5, false), 12),
            ];
            for row in &rows {
                assert!(repo.save_result(row).await.unwrap());
            }
            repo
        }
    }

    use helpers::*;

    #[tokio::test]
    async fn test_save_and_reject_duplicate() {
        let repo = InMemoryResultRepository::new();
        let row = new_result("2024-03-04", "alice", 3, true);

        assert!(repo.save_result(&row).await.unwrap());
        assert!(!repo.save_result(&row).await.unwrap());

        // Same player on another day is fine.
        let next_day = new_result("2024-03-05", "alice", 4, false);
        assert!(repo.save_result(&next_day).await.unwrap());
        assert_eq!(repo.result_count().await, 2);
    }

    #[tokio::test]
    async fn test_leaderboard() {
        let repo = seeded_repo().await;

        let board = repo.leaderboard(10).await.unwrap();
        assert_eq!(
            board,
            vec![
                LeaderboardEntry {
                    player_name: "alice".into(),
                    wins: 2
                },
                LeaderboardEntry {
                    player_name: "bob".into(),
                    wins: 1
                },
            ]
        );

        assert_eq!(repo.leaderboard(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_player_stats() {
        let repo = seeded_repo().await;

        let bob = repo.player_stats("bob").await.unwrap().unwrap();
        assert_eq!(bob.total_games, 3);
        assert_eq!(bob.total_wins, 1);
        assert_eq!(bob.fail_count, 1);
        assert_eq!(bob.avg_score, Some(2.5));
        assert_eq!(bob.best_score, Some(1));

        assert!(repo.player_stats("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_player_averages_order() {
        let repo = seeded_repo().await;
        repo.save_result(&new_result("2024-03-06", "dave", 7, false))
            .await
            .unwrap();

        let averages = repo.player_averages().await.unwrap();
        let names: Vec<&str> = averages.iter().map(|a| a.player_name.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob", "carol", "dave"]);
        assert_eq!(averages[0].avg_score, Some(2.5));
        assert_eq!(averages[3].avg_score, None);
        assert_eq!(averages[3].game_count, 1);
    }

    #[tokio::test]
    async fn test_recent_results_newest_first() {
        let repo = seeded_repo().await;

        let recent = repo.recent_results(1).await.unwrap();
        assert_eq!(recent.len(), 6);
        assert_eq!(recent[0].date, "2024-03-06");
        assert_eq!(recent[0].player_name, "bob");
        assert_eq!(recent[5].date, "2024-03-04");
    }

    #[tokio::test]
    async fn test_head_to_head() {
        let repo = seeded_repo().await;

        let h2h = repo.head_to_head("alice", "bob").await.unwrap().unwrap();
        assert_eq!(h2h.matchups, 2);
        assert_eq!(h2h.p1_wins, 2);
        assert_eq!(h2h.p2_wins, 0);
        assert_eq!(h2h.ties, 0);

        let h2h = repo.head_to_head("bob", "carol").await.unwrap().unwrap();
        assert_eq!(h2h.matchups, 1);
        assert_eq!(h2h.p1_wins, 1);

        assert!(repo.head_to_head("alice", "nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_streak_info() {
        let repo = InMemoryResultRepository::new();
        assert_eq!(repo.streak_info().await.unwrap(), StreakInfo::default());

        let repo = seeded_repo().await;
        repo.save_result(&with_streak(new_result("2024-03-07", "alice", 4, true), 1))
            .await
            .unwrap();

        let info = repo.streak_info().await.unwrap();
        assert_eq!(info.current_streak, 1);
        assert_eq!(info.best_streak, 12);
    }

    #[tokio::test]
    async fn test_lucky_players() {
        let repo = seeded_repo().await;

        let lucky = repo.lucky_players().await.unwrap();
        assert_eq!(
            lucky,
            vec![
                LuckyPlayer {
                    player_name: "alice".into(),
                    lucky_count: 1
                },
                LuckyPlayer {
                    player_name: "bob".into(),
                    lucky_count: 1
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_weekday_winners() {
        let repo = seeded_repo().await;

        let winners = repo.weekday_winners().await.unwrap();
        assert_eq!(
            winners,
            vec![
                WeekdayWinner {
                    weekday: "Monday".into(),
                    player_name: "alice".into(),
                    wins: 1
                },
                WeekdayWinner {
                    weekday: "Tuesday".into(),
                    player_name: "alice".into(),
                    wins: 1
                },
                WeekdayWinner {
                    weekday: "Wednesday".into(),
                    player_name: "bob".into(),
                    wins: 1
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_summary_and_players() {
        let repo = InMemoryResultRepository::new();
        assert_eq!(repo.summary().await.unwrap(), StoreSummary::default());

        let repo = seeded_repo().await;
        let summary = repo.summary().await.unwrap();
        assert_eq!(summary.total_results, 6);
        assert_eq!(summary.unique_players, 3);
        assert_eq!(summary.days_tracked, 3);
        assert_eq!(summary.first_date.as_deref(), Some("2024-03-04"));
        assert_eq!(summary.last_date.as_deref(), Some("2024-03-06"));

        let players = repo.players().await.unwrap();
        let names: Vec<(&str, i64)> = players
            .iter()
            .map(|p| (p.player_name.as_str(), p.games))
            .collect();
        assert_eq!(names, vec![("bob", 3), ("alice", 2), ("carol", 1)]);
    }

    #[test]
    fn test_top_per_weekday_breaks_ties_by_name() {
        let winners = top_per_weekday(vec![
            (6, "zed".into(), 2),
            (6, "amy".into(), 2),
            (6, "bob".into(), 1),
            (9, "ignored".into(), 5),
        ]);
        assert_eq!(
            winners,
            vec![WeekdayWinner {
                weekday: "Sunday".into(),
                player_name: "amy".into(),
                wins: 2
            }]
        );
    }
}
