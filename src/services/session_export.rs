use crate::models::domain::PlayerSession;

pub const EXPORT_FILE_NAME: &str = "relatix_player_data.csv";

const HEADERS: [&str; 7] = [
    "PlayerName",
    "PlayerAvatar",
    "FinalScore",
    "Date",
    "QuestionID",
    "Correct",
    "ChosenAnswer",
];

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        quote(field)
    } else {
        field.to_string()
    }
}

/// Flattens sessions into one CSV row per answered question. A session
/// without answers still gets a row with the question columns left empty.
pub fn sessions_to_csv(sessions: &[PlayerSession]) -> String {
    let mut csv = HEADERS.join(",");
    csv.push('\n');

    for session in sessions {
        let prefix = [
            escape(&session.name),
            escape(&session.avatar),
            session.score.to_string(),
            escape(&session.date),
        ]
        .join(",");

        if session.performance.is_empty() {
            csv.push_str(&prefix);
            csv.push_str(",,,\n");
            continue;
        }

        for perf in &session.performance {
            csv.push_str(&prefix);
            csv.push(',');
            csv.push_str(&escape(&perf.question_id));
            csv.push(',');
            csv.push_str(if perf.correct { "true" } else { "false" });
            csv.push(',');
            csv.push_str(&quote(&perf.chosen_answer));
            csv.push('\n');
        }
    }

    csv
}
