use deadpool_postgres::Pool;
use uuid::Uuid;

use crate::economy::EconomyLog;
use crate::engine::MatchResult;
use crate::player::Player;

#[derive(Debug, Clone)]
pub struct TeamRow {
    pub id: String,
    pub name: String,
    pub region: Option<String>,
}

/// Resolves a team by id first, then by name.
pub async fn get_team(pool: &Pool, ident: &str) -> Result<Option<TeamRow>, String> {
    let client = pool.get().await.map_err(|e| format!("Failed to get DB client: {}", e))?;
    let rows = client
        .query(
            "SELECT id, team_name, region FROM teams WHERE id = $1 OR team_name = $1",
            &[&ident],
        )
        .await
        .map_err(|e| format!("DB query error: {}", e))?;
    Ok(rows.first().map(|row| TeamRow {
        id: row.get("id"),
        name: row.get("team_name"),
        region: row.get("region"),
    }))
}

/// Loads a team's roster. Player records are stored as JSON documents and
/// deserialized into the engine's player shape.
pub async fn get_team_players(pool: &Pool, team_id: &str) -> Result<Vec<Player>, String> {
    let client = pool.get().await.map_err(|e| format!("Failed to get DB client: {}", e))?;
    let rows = client
        .query(
            "SELECT data::text AS data FROM players WHERE team_id = $1 ORDER BY id",
            &[&team_id],
        )
        .await
        .map_err(|e| format!("DB query error: {}", e))?;

    let mut players = Vec::with_capacity(rows.len());
    for row in rows {
        let raw: String = row.get("data");
        let player: Player = serde_json::from_str(&raw)
            .map_err(|e| format!("Failed to parse stored player: {}", e))?;
        players.push(player);
    }
    Ok(players)
}

/// Persists the match header and returns the new record id.
pub async fn insert_match_record(
    pool: &Pool,
    team_a_name: &str,
    team_b_name: &str,
    result: &MatchResult,
) -> Result<String, String> {
    let client = pool.get().await.map_err(|e| format!("Failed to get DB client: {}", e))?;
    let match_id = Uuid::new_v4().to_string();
    let rounds = serde_json::to_string(&result.rounds)
        .map_err(|e| format!("Failed to serialize rounds: {}", e))?;
    client
        .execute(
            "INSERT INTO matches \
             (id, team_a_name, team_b_name, map, score_a, score_b, mvp, duration, rounds) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9::jsonb)",
            &[
                &match_id,
                &team_a_name,
                &team_b_name,
                &result.map,
                &(result.score.team_a as i32),
                &(result.score.team_b as i32),
                &result.mvp,
                &result.duration,
                &rounds,
            ],
        )
        .await
        .map_err(|e| format!("DB insert error: {}", e))?;
    Ok(match_id)
}

pub async fn insert_economy_logs(
    pool: &Pool,
    match_id: &str,
    logs: &[EconomyLog],
) -> Result<(), String> {
    let client = pool.get().await.map_err(|e| format!("Failed to get DB client: {}", e))?;
    for log in logs {
        let data = serde_json::to_string(log)
            .map_err(|e| format!("Failed to serialize economy log: {}", e))?;
        client
            .execute(
                "INSERT INTO match_economy_logs (match_id, round_number, data) \
                 VALUES ($1, $2, $3::jsonb)",
                &[&match_id, &(log.round_number as i32), &data],
            )
            .await
            .map_err(|e| format!("DB insert error: {}", e))?;
    }
    Ok(())
}
