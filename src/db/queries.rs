use anyhow::Context;
use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

use crate::models::{
    Category, ClassificationResult, ConversationLog, ConversationTurn, Mood, Session, SessionState,
};

const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn fmt_ts(ts: &NaiveDateTime) -> String {
    ts.format(TS_FORMAT).to_string()
}

fn parse_ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, TS_FORMAT).unwrap_or_else(|_| Utc::now().naive_utc())
}

fn now_ts() -> String {
    fmt_ts(&Utc::now().naive_utc())
}

// ── Sessions ──

/// Loads an unexpired session with its full turn log.
pub fn get_session(conn: &Connection, id: &str) -> anyhow::Result<Option<Session>> {
    let row = conn
        .query_row(
            "SELECT id, name, last_intent, turn_count, mood, created_at, last_activity, expires_at
             FROM sessions WHERE id = ?1 AND expires_at > ?2",
            params![id, now_ts()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, u32>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                    row.get::<_, String>(7)?,
                ))
            },
        )
        .optional()?;

    let Some((id, name, last_intent, turn_count, mood, created_at, last_activity, expires_at)) = row
    else {
        return Ok(None);
    };

    let turns = get_turns(conn, &id)?;

    Ok(Some(Session {
        state: SessionState {
            name,
            last_intent: last_intent.as_deref().and_then(Category::parse),
            turn_count,
            mood: Mood::parse(&mood),
        },
        log: ConversationLog::from_turns(turns),
        created_at: parse_ts(&created_at),
        last_activity: parse_ts(&last_activity),
        expires_at: parse_ts(&expires_at),
        id,
    }))
}

pub fn save_session(conn: &Connection, session: &Session) -> anyhow::Result<()> {
    let state = &session.state;
    conn.execute(
        "INSERT INTO sessions (id, name, last_intent, turn_count, mood, created_at, last_activity, expires_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
         ON CONFLICT(id) DO UPDATE SET
           name = excluded.name,
           last_intent = excluded.last_intent,
           turn_count = excluded.turn_count,
           mood = excluded.mood,
           last_activity = excluded.last_activity,
           expires_at = excluded.expires_at",
        params![
            session.id,
            state.name,
            state.last_intent.map(|c| c.as_str()),
            state.turn_count,
            state.mood.as_str(),
            fmt_ts(&session.created_at),
            fmt_ts(&session.last_activity),
            fmt_ts(&session.expires_at),
        ],
    )?;
    Ok(())
}

/// Persists the session state together with the newest logged turn.
/// Earlier turns are already stored and are never rewritten.
pub fn record_turn(conn: &Connection, session: &Session) -> anyhow::Result<()> {
    let tx = conn.unchecked_transaction()?;
    save_session(&tx, session)?;

    if let Some(turn) = session.log.last() {
        let seq = session.log.len() as i64;
        let classification = serde_json::to_string(&turn.classification)?;
        tx.execute(
            "INSERT INTO conversation_turns (session_id, seq, utterance, reply, classification, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                session.id,
                seq,
                turn.utterance,
                turn.reply,
                classification,
                fmt_ts(&turn.timestamp),
            ],
        )
        .context("failed to append conversation turn")?;
    }

    tx.commit()?;
    Ok(())
}

fn get_turns(conn: &Connection, session_id: &str) -> anyhow::Result<Vec<ConversationTurn>> {
    let mut stmt = conn.prepare(
        "SELECT utterance, reply, classification, created_at
         FROM conversation_turns WHERE session_id = ?1 ORDER BY seq ASC",
    )?;

    let rows = stmt.query_map(params![session_id], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
        ))
    })?;

    let mut turns = Vec::new();
    for row in rows {
        let (utterance, reply, classification_json, created_at) = row?;
        let classification: ClassificationResult = serde_json::from_str(&classification_json)
            .context("stored classification is not valid JSON")?;
        turns.push(ConversationTurn {
            utterance,
            reply,
            classification,
            timestamp: parse_ts(&created_at),
        });
    }
    Ok(turns)
}

pub fn delete_session(conn: &Connection, id: &str) -> anyhow::Result<bool> {
    let count = conn.execute("DELETE FROM sessions WHERE id = ?1", params![id])?;
    Ok(count > 0)
}

pub fn expire_old_sessions(conn: &Connection) -> anyhow::Result<usize> {
    let count = conn.execute(
        "DELETE FROM sessions WHERE expires_at <= ?1",
        params![now_ts()],
    )?;
    if count > 0 {
        tracing::info!(count, "expired idle sessions");
    }
    Ok(count)
}

// ── Stats ──

#[derive(Debug, Serialize)]
pub struct SessionStats {
    pub active_sessions: i64,
    pub total_turns: i64,
}

pub fn get_session_stats(conn: &Connection) -> anyhow::Result<SessionStats> {
    let now = now_ts();
    let active_sessions: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sessions WHERE expires_at > ?1",
        params![now],
        |row| row.get(0),
    )?;
    let total_turns: i64 = conn.query_row(
        "SELECT COUNT(*) FROM conversation_turns t
         JOIN sessions s ON s.id = t.session_id
         WHERE s.expires_at > ?1",
        params![now],
        |row| row.get(0),
    )?;

    Ok(SessionStats {
        active_sessions,
        total_turns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use crate::models::KnowledgeBase;
    use crate::services::conversation::process_message;
    use crate::services::picker::FixedPicker;
    use chrono::Duration;

    #[test]
    fn test_session_round_trip() {
        let conn = init_db(":memory:").unwrap();
        let kb = KnowledgeBase::builtin().unwrap();
        let mut session = Session::new(30);
        save_session(&conn, &session).unwrap();

        for utterance in ["my name is Zawadi", "I have a fever"] {
            process_message(&mut session, utterance, &kb, &FixedPicker(0)).unwrap();
            record_turn(&conn, &session).unwrap();
        }

        let loaded = get_session(&conn, &session.id).unwrap().unwrap();
        assert_eq!(loaded.state, session.state);
        assert_eq!(loaded.log.len(), 2);
        assert_eq!(loaded.log.turns()[1].utterance, "I have a fever");
        assert_eq!(
            loaded.log.turns()[1].classification,
            session.log.turns()[1].classification
        );
    }

    #[test]
    fn test_missing_session() {
        let conn = init_db(":memory:").unwrap();
        assert!(get_session(&conn, "nope").unwrap().is_none());
        assert!(!delete_session(&conn, "nope").unwrap());
    }

    #[test]
    fn test_expired_session_is_hidden_and_purged() {
        let conn = init_db(":memory:").unwrap();
        let mut session = Session::new(30);
        session.expires_at = Utc::now().naive_utc() - Duration::minutes(1);
        save_session(&conn, &session).unwrap();

        assert!(get_session(&conn, &session.id).unwrap().is_none());
        assert_eq!(expire_old_sessions(&conn).unwrap(), 1);
        assert_eq!(get_session_stats(&conn).unwrap().active_sessions, 0);
    }

    #[test]
    fn test_delete_cascades_turns() {
        let conn = init_db(":memory:").unwrap();
        let kb = KnowledgeBase::builtin().unwrap();
        let mut session = Session::new(30);
        process_message(&mut session, "hello", &kb, &FixedPicker(0)).unwrap();
        record_turn(&conn, &session).unwrap();
        assert_eq!(get_session_stats(&conn).unwrap().total_turns, 1);

        assert!(delete_session(&conn, &session.id).unwrap());
        let remaining: i64 = conn
            .query_row("SELECT COUNT(*) FROM conversation_turns", [], |row| row.get(0))
            .unwrap();
        assert_eq!(remaining, 0);
    }
}
