//! Fixed Indonesian message templates.
//!
//! These are configuration data, reproduced verbatim from the production
//! roster. Do not "improve" the wording or the WhatsApp markup
//! (`*bold*`, `_italic_`) — field staff and the reporting bot both parse
//! these messages.

use chrono::NaiveDate;

use rawat_roster::{calendar, ResolvedAssignment};

/// Render the individual message for one member of an assigned team.
pub fn individual_message(member_name: &str, assignment: &ResolvedAssignment) -> String {
    format!(
        "Selamat Pagi kak {member}, hari ini adalah jadwal PM untuk _{description}_ di area *{area}*

Detail pekerjaan:{detail}

Khusus untuk pelaporan Pekerjaan PM ini gunakan

> .L2 Laporannya

Harap lakukan pemeriksaan dan pemeliharaan sesuai dengan detail di atas. Selamat bekerja!",
        member = member_name,
        description = assignment.asset.description,
        area = assignment.asset.name,
        detail = assignment.asset.detail,
    )
}

/// Render the group summary: date header, one numbered line per
/// assignment with the team members joined by the literal word "dan",
/// and the fixed closing lines.
pub fn summary_message(date: NaiveDate, assignments: &[ResolvedAssignment]) -> String {
    let formatted_date = calendar::format_date_id(date);
    let lines = assignments
        .iter()
        .enumerate()
        .map(|(index, a)| {
            let members = a
                .team
                .members
                .iter()
                .map(|m| m.name.as_str())
                .collect::<Vec<_>>()
                .join(" dan ");
            format!("{}. {} : _{}_", index + 1, a.asset.name, members)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "
📅 *JADWAL PM {formatted_date}*

{lines}

Untuk detail pekerjaannya telah dikirim pada masing-masing tim.
Terimakasih 🙏"
    )
}
