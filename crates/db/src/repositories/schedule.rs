use crate::models::DbJadwal;
use booking_core::models::doctor::ScheduleTemplate;
use chrono::Weekday;
use eyre::{eyre, Result};
use sqlx::{MySql, Pool};

/// Khanza's `hari_kerja` value for a weekday. Sunday is spelled `AKHAD`.
pub fn hari_kerja(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "SENIN",
        Weekday::Tue => "SELASA",
        Weekday::Wed => "RABU",
        Weekday::Thu => "KAMIS",
        Weekday::Fri => "JUMAT",
        Weekday::Sat => "SABTU",
        Weekday::Sun => "AKHAD",
    }
}

pub fn weekday_from_hari(hari: &str) -> Option<Weekday> {
    match hari.trim().to_ascii_uppercase().as_str() {
        "SENIN" => Some(Weekday::Mon),
        "SELASA" => Some(Weekday::Tue),
        "RABU" => Some(Weekday::Wed),
        "KAMIS" => Some(Weekday::Thu),
        "JUMAT" => Some(Weekday::Fri),
        "SABTU" => Some(Weekday::Sat),
        "AKHAD" | "MINGGU" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Converts a `jadwal` row into a template with the configured slot length.
pub fn to_template(row: DbJadwal, slot_minutes: u32) -> Result<ScheduleTemplate> {
    let weekday = weekday_from_hari(&row.hari_kerja)
        .ok_or_else(|| eyre!("Unknown hari_kerja '{}' for doctor {}", row.hari_kerja, row.kd_dokter))?;

    Ok(ScheduleTemplate {
        doctor_id: row.kd_dokter,
        doctor_name: row.nm_dokter.unwrap_or_default(),
        weekday,
        start_time: row.jam_mulai,
        end_time: row.jam_selesai,
        slot_minutes,
    })
}

/// Working hours on `weekday` for active doctors, optionally a single one.
pub async fn get_doctor_templates(
    pool: &Pool<MySql>,
    doctor_id: Option<&str>,
    weekday: Weekday,
    slot_minutes: u32,
) -> Result<Vec<ScheduleTemplate>> {
    tracing::debug!(
        "Loading jadwal: doctor_id={:?}, hari_kerja={}",
        doctor_id,
        hari_kerja(weekday)
    );

    let rows = sqlx::query_as::<_, DbJadwal>(
        r#"
        SELECT j.kd_dokter, d.nm_dokter, CAST(j.hari_kerja AS CHAR) AS hari_kerja,
               j.jam_mulai, j.jam_selesai
        FROM jadwal j
        INNER JOIN dokter d ON d.kd_dokter = j.kd_dokter
        WHERE j.hari_kerja = ?
          AND d.status = '1'
          AND (? IS NULL OR j.kd_dokter = ?)
        ORDER BY j.jam_mulai ASC, j.kd_dokter ASC
        "#,
    )
    .bind(hari_kerja(weekday))
    .bind(doctor_id)
    .bind(doctor_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| to_template(row, slot_minutes))
        .collect()
}
