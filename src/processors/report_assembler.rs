use crate::error::{ProcessingError, Result};
use crate::format::{render_fields, FieldDescriptor, FieldValue, FormatSpec};
use crate::models::{LittleRRecord, Observation};
use crate::processors::bucketizer::Segment;
use crate::utils::constants::{
    CELSIUS_TO_KELVIN, HPA_TO_PA, LITTLE_R_DATE_FORMAT, MISSING_INTEGER, MISSING_VALUE,
    PLATFORM_CODE, QC_UNFLAGGED, SOURCE_NAME,
};
use crate::writers::ReportSink;
use std::path::Path;
use tracing::debug;

const F20_5: FormatSpec = FormatSpec::decimal(20, 5);
const F13_5: FormatSpec = FormatSpec::decimal(13, 5);
const I10: FormatSpec = FormatSpec::integer(10);
const I7: FormatSpec = FormatSpec::integer(7);
const A40: FormatSpec = FormatSpec::string(40);
const A20: FormatSpec = FormatSpec::string(20);
const L10: FormatSpec = FormatSpec::logical(10);

/// Station metadata columns of the header record
const HEADER_STATION_FIELDS: [FieldDescriptor; 18] = [
    FieldDescriptor::blank("latitude", F20_5),
    FieldDescriptor::blank("longitude", F20_5),
    FieldDescriptor::blank("id", A40),
    FieldDescriptor::blank("name", A40),
    FieldDescriptor::blank("platform", A40),
    FieldDescriptor::blank("source", A40),
    FieldDescriptor::blank("elevation", F20_5),
    FieldDescriptor::blank("valid_fields", I10),
    FieldDescriptor::blank("num_errors", I10),
    FieldDescriptor::blank("num_warnings", I10),
    FieldDescriptor::blank("sequence_number", I10),
    FieldDescriptor::blank("num_duplicates", I10),
    FieldDescriptor::blank("is_sounding", L10),
    FieldDescriptor::blank("is_bogus", L10),
    FieldDescriptor::blank("discard", L10),
    FieldDescriptor::blank("unix_time", I10),
    FieldDescriptor::blank("julian_day", I10),
    FieldDescriptor::blank("date", A20),
];

/// Surface fields trailing the header; never populated from input
const HEADER_SURFACE_FIELDS: [&str; 14] = [
    "slp",
    "ref_pressure",
    "ground_temperature",
    "sst",
    "surface_pressure",
    "precipitation",
    "daily_max_temperature",
    "daily_min_temperature",
    "night_min_temperature",
    "pressure_change_3h",
    "pressure_change_24h",
    "cloud_cover",
    "ceiling",
    "precipitable_water",
];

/// Level fields of the data record
const DATA_FIELDS: [FieldDescriptor; 10] = [
    FieldDescriptor::sentinel("pressure", F13_5, MISSING_VALUE),
    FieldDescriptor::sentinel("height", F13_5, MISSING_VALUE),
    FieldDescriptor::sentinel("temperature", F13_5, MISSING_VALUE),
    FieldDescriptor::sentinel("dew_point", F13_5, MISSING_VALUE),
    FieldDescriptor::sentinel("wind_speed", F13_5, MISSING_VALUE),
    FieldDescriptor::sentinel("wind_direction", F13_5, MISSING_VALUE),
    FieldDescriptor::sentinel("wind_u", F13_5, MISSING_VALUE),
    FieldDescriptor::sentinel("wind_v", F13_5, MISSING_VALUE),
    FieldDescriptor::sentinel("relative_humidity", F13_5, MISSING_VALUE),
    FieldDescriptor::sentinel("thickness", F13_5, MISSING_VALUE),
];

const QC_FIELD: FieldDescriptor = FieldDescriptor::blank("qc", I7);

/// Lays out little_r station reports
#[derive(Debug, Clone, Default)]
pub struct ReportAssembler;

impl ReportAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Build the four-record report for one observation
    pub fn assemble(&self, observation: &Observation) -> Result<LittleRRecord> {
        let header = self.header_record(observation)?;
        let data = self.data_record(observation)?;
        Ok(LittleRRecord::new(header, data))
    }

    /// Build one report for a time window, using its first observation
    pub fn assemble_segment(&self, segment: &Segment<'_>) -> Result<LittleRRecord> {
        let representative = segment.observations.first().ok_or_else(|| {
            ProcessingError::MissingData(format!(
                "segment starting at {} has no observations",
                segment.bucket_start
            ))
        })?;

        debug!(
            "Rendering window {} with {} observation(s)",
            segment.midpoint(),
            segment.len()
        );
        self.assemble(representative)
    }

    /// Assemble and hand the report text to `sink` under `path`
    pub fn write(
        &self,
        observation: &Observation,
        path: &Path,
        sink: &mut dyn ReportSink,
    ) -> Result<String> {
        let text = self.assemble(observation)?.to_text();
        sink.persist(path, &text)?;
        Ok(text)
    }

    pub fn write_segment(
        &self,
        segment: &Segment<'_>,
        path: &Path,
        sink: &mut dyn ReportSink,
    ) -> Result<String> {
        let text = self.assemble_segment(segment)?.to_text();
        sink.persist(path, &text)?;
        Ok(text)
    }

    fn header_record(&self, obs: &Observation) -> Result<String> {
        let date = obs.observed_at()?.format(LITTLE_R_DATE_FORMAT).to_string();

        let values = [
            FieldValue::from(obs.latitude),
            FieldValue::from(obs.longitude),
            FieldValue::from(obs.id.clone()),
            FieldValue::from(obs.mission_name.clone()),
            FieldValue::from(PLATFORM_CODE),
            FieldValue::from(SOURCE_NAME),
            FieldValue::Absent,
            FieldValue::Integer(MISSING_INTEGER),
            FieldValue::Integer(0),
            FieldValue::Integer(0),
            FieldValue::Integer(0),
            FieldValue::Integer(0),
            FieldValue::Logical(true),
            FieldValue::Logical(false),
            FieldValue::Logical(false),
            // Deliberately not the observation time
            FieldValue::Integer(MISSING_INTEGER),
            FieldValue::Integer(MISSING_INTEGER),
            FieldValue::Text(date),
        ];

        let mut fields: Vec<(FieldDescriptor, FieldValue)> = HEADER_STATION_FIELDS
            .iter()
            .copied()
            .zip(values)
            .collect();

        for name in HEADER_SURFACE_FIELDS {
            fields.push((
                FieldDescriptor::sentinel(name, F13_5, MISSING_VALUE),
                FieldValue::Absent,
            ));
            fields.push((QC_FIELD, FieldValue::Integer(QC_UNFLAGGED)));
        }

        render_fields(&fields)
    }

    fn data_record(&self, obs: &Observation) -> Result<String> {
        let pressure_pa = obs.pressure.map(hpa_to_pa);
        let temperature_k = obs.temperature.map(celsius_to_kelvin);

        let values = [
            FieldValue::from(pressure_pa),
            FieldValue::from(obs.altitude),
            FieldValue::from(temperature_k),
            FieldValue::Absent,
            FieldValue::Absent,
            FieldValue::Absent,
            FieldValue::from(obs.speed_u),
            FieldValue::from(obs.speed_v),
            FieldValue::from(obs.humidity),
            FieldValue::Absent,
        ];

        let mut fields = Vec::with_capacity(DATA_FIELDS.len() * 2);
        for (descriptor, value) in DATA_FIELDS.iter().copied().zip(values) {
            fields.push((descriptor, value));
            fields.push((QC_FIELD, FieldValue::Integer(QC_UNFLAGGED)));
        }

        render_fields(&fields)
    }
}

pub fn hpa_to_pa(pressure_hpa: f64) -> f64 {
    pressure_hpa * HPA_TO_PA
}

pub fn celsius_to_kelvin(temperature_c: f64) -> f64 {
    temperature_c + CELSIUS_TO_KELVIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::format_value;
    use crate::utils::constants::{DATA_RECORD_WIDTH, END_RECORD, HEADER_WIDTH, TAIL_RECORD};
    use crate::writers::MemorySink;
    use pretty_assertions::assert_eq;

    fn sample_observation() -> Observation {
        Observation {
            temperature: Some(20.0),
            ..Observation::new(1700000000)
                .with_position(45.0, -122.0)
                .with_id("abc")
                .with_mission("M1")
        }
    }

    // (value, qc) pair `index` of a record starting at `offset`
    fn pair(line: &str, offset: usize, index: usize) -> (&str, &str) {
        let start = offset + index * 20;
        (&line[start..start + 13], &line[start + 13..start + 20])
    }

    #[test]
    fn test_record_widths() {
        let record = ReportAssembler::new().assemble(&sample_observation()).unwrap();
        assert_eq!(record.header.len(), HEADER_WIDTH);
        assert_eq!(record.data.len(), DATA_RECORD_WIDTH);
        assert_eq!(record.end_record, END_RECORD);
        assert_eq!(record.tail_record, TAIL_RECORD);
    }

    #[test]
    fn test_header_layout() {
        let header = ReportAssembler::new()
            .assemble(&sample_observation())
            .unwrap()
            .header;

        assert_eq!(&header[0..20], "            45.00000");
        assert_eq!(&header[20..40], "          -122.00000");
        assert_eq!(&header[40..80], format!("{:<40}", "abc"));
        assert_eq!(&header[80..120], format!("{:<40}", "M1"));
        assert_eq!(&header[120..160], format!("{:<40}", "FM-35 TEMP"));
        assert_eq!(&header[160..200], format!("{:<40}", "WindBorne"));
        assert_eq!(&header[200..220], " ".repeat(20));
        assert_eq!(&header[220..230], "   -888888");
        assert_eq!(&header[230..270], "         0         0         0         0");
        assert_eq!(&header[270..300], "         T         F         F");
        assert_eq!(&header[300..320], "   -888888   -888888");
        assert_eq!(&header[320..340], "20231114221320      ");
        for i in 0..14 {
            assert_eq!(pair(&header, 340, i), ("-888888.00000", "      0"));
        }
    }

    #[test]
    fn test_missing_position_is_blank() {
        let obs = Observation::new(1700000000).with_mission("M1");
        let header = ReportAssembler::new().assemble(&obs).unwrap().header;
        assert_eq!(&header[0..40], " ".repeat(40));
        assert_eq!(&header[40..80], " ".repeat(40));
    }

    #[test]
    fn test_data_record_sentinels_and_conversions() {
        let data = ReportAssembler::new()
            .assemble(&sample_observation())
            .unwrap()
            .data;

        assert_eq!(pair(&data, 0, 0), ("-888888.00000", "      0"));
        assert_eq!(pair(&data, 0, 1).0, "-888888.00000");
        assert_eq!(pair(&data, 0, 2).0, "    293.15000");
        for i in 3..10 {
            assert_eq!(pair(&data, 0, i), ("-888888.00000", "      0"));
        }
    }

    #[test]
    fn test_data_record_passes_values_through() {
        let obs = Observation {
            pressure: Some(850.25),
            altitude: Some(1500.0),
            speed_u: Some(-3.5),
            speed_v: Some(4.25),
            humidity: Some(55.5),
            ..sample_observation()
        };
        let data = ReportAssembler::new().assemble(&obs).unwrap().data;

        assert_eq!(pair(&data, 0, 0).0, "  85025.00000");
        assert_eq!(pair(&data, 0, 1).0, "   1500.00000");
        assert_eq!(pair(&data, 0, 6).0, "     -3.50000");
        assert_eq!(pair(&data, 0, 7).0, "      4.25000");
        assert_eq!(pair(&data, 0, 8).0, "     55.50000");
    }

    #[test]
    fn test_unit_conversions_match_direct_formatting() {
        for pressure in [1013.25, 500.0, 3.7] {
            let obs = Observation {
                pressure: Some(pressure),
                ..sample_observation()
            };
            let data = ReportAssembler::new().assemble(&obs).unwrap().data;
            let direct = format_value(&FieldValue::Decimal(pressure * 100.0), &F13_5).unwrap();
            assert_eq!(pair(&data, 0, 0).0, direct);
        }

        for temperature in [-60.5, 0.0, 31.2] {
            let obs = Observation {
                temperature: Some(temperature),
                ..sample_observation()
            };
            let data = ReportAssembler::new().assemble(&obs).unwrap().data;
            let direct =
                format_value(&FieldValue::Decimal(temperature + 273.15), &F13_5).unwrap();
            assert_eq!(pair(&data, 0, 2).0, direct);
        }
    }

    #[test]
    fn test_long_identifiers_are_truncated() {
        let long_id = "x".repeat(60);
        let obs = sample_observation().with_id(&long_id);
        let header = ReportAssembler::new().assemble(&obs).unwrap().header;
        assert_eq!(header.len(), HEADER_WIDTH);
        assert_eq!(&header[40..80], "x".repeat(40));
    }

    #[test]
    fn test_write_hands_text_to_sink() {
        let mut sink = MemorySink::new();
        let path = Path::new("M1/abc.little_r");
        let text = ReportAssembler::new()
            .write(&sample_observation(), path, &mut sink)
            .unwrap();

        assert_eq!(sink.get(path), Some(text.as_str()));
        assert_eq!(text.lines().count(), 4);
    }
}
