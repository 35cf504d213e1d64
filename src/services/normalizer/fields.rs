// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Candidate field keys per canonical field, most specific first.
//!
//! Decoders disagree on naming: FitCSVTool emits human labels
//! (`"hole number"`), JS decoders emit snake or camel case, and some emit
//! the raw FIT field number as a decimal string.

/// An ordered list of keys to try.
pub type Keys = &'static [&'static str];

/// Keys of a rich document holding each message list.
pub mod groups {
    use super::Keys;

    pub const FILE_INFO: Keys = &["0", "file_id", "fileId", "file_ids", "file_id_mesgs", "fileIdMesgs"];
    pub const COURSE: Keys = &["190", "golf_course", "golfCourse", "golf_course_mesgs", "golfCourseMesgs"];
    pub const SCORE: Keys = &["192", "scores", "score", "score_mesgs", "scoreMesgs"];
    pub const HOLE: Keys = &["193", "holes", "hole", "hole_mesgs", "holeMesgs"];
    pub const SHOT: Keys = &["194", "shots", "shot", "shot_mesgs", "shotMesgs"];
    pub const RECORD: Keys = &["20", "records", "record", "record_mesgs", "recordMesgs"];
    pub const SESSION: Keys = &["18", "sessions", "session", "session_mesgs", "sessionMesgs"];
}

/// Message label keys of a generic row.
pub const LABEL: Keys = &["Message", "message", "Name", "name"];

pub mod file_info {
    use super::Keys;

    pub const MANUFACTURER: Keys = &["manufacturer", "1"];
    pub const PRODUCT: Keys = &["product", "garmin_product", "garmin product", "product name", "2"];
    pub const SERIAL_NUMBER: Keys = &["serial number", "serial_number", "serialNumber", "3"];
    pub const TIME_CREATED: Keys = &["time created", "time_created", "timeCreated", "4"];
}

pub mod course {
    use super::Keys;

    pub const ID: Keys = &["course id", "course_id", "courseId", "course global id", "courseGlobalId"];
    pub const NAME: Keys = &["name", "course name", "course_name", "courseName", "1"];
    pub const OUT_PAR: Keys = &["out par", "out_par", "outPar"];
    pub const IN_PAR: Keys = &["in par", "in_par", "inPar"];
    pub const TOTAL_PAR: Keys = &["total par", "total_par", "totalPar", "par"];
    pub const RATING: Keys = &["rating", "course rating", "course_rating", "courseRating"];
    pub const SLOPE: Keys = &["slope", "slope rating", "slope_rating", "slopeRating"];
}

pub mod hole {
    use super::Keys;

    pub const NUMBER: Keys = &["hole number", "hole_number", "holeNumber", "number", "hole", "0", "1"];
    pub const PAR: Keys = &["par", "hole par", "hole_par", "holePar", "2"];
    pub const DISTANCE: Keys = &["distance", "hole distance", "hole_distance", "holeDistance"];
    pub const HANDICAP: Keys = &["handicap", "hole handicap", "hole_handicap", "holeHandicap"];
    pub const LAT: Keys = &["position lat", "position_lat", "positionLat", "lat"];
    pub const LONG: Keys = &["position long", "position_long", "positionLong", "long", "lon"];
}

pub mod score {
    use super::Keys;

    pub const NUMBER: Keys = &["hole number", "hole_number", "holeNumber", "number", "hole", "1", "0"];
    pub const STROKES: Keys = &["score", "strokes", "2"];
    pub const PUTTS: Keys = &["putts", "5", "6"];
    pub const FAIRWAY: Keys = &["fairway", "fairway outcome", "fairway_outcome", "fairwayOutcome"];
    pub const PENALTIES: Keys = &["penalties", "penalty", "penalty strokes", "penalty_strokes"];
}

pub mod shot {
    use super::Keys;

    /// Only the shot export carries the round id inside the message.
    pub const ROUND_ID: Keys = &["scorecardId", "scorecard_id", "roundId", "round_id"];
    pub const NUMBER: Keys = &["holeNumber", "hole", "hole number", "hole_number", "number", "1", "0"];
    pub const ORDER: Keys = &["shotOrder", "shot_order", "shot order"];
    pub const TIME: Keys = &["shotTime", "shot_time", "shot time", "timestamp"];
    pub const CLUB_ID: Keys = &["clubId", "club_id", "club id"];
    pub const START_LIE: Keys = &["startLoc.lie", "start.lie", "start lie", "start_lie"];
    pub const END_LIE: Keys = &["endLoc.lie", "end.lie", "end lie", "end_lie"];
    pub const START_LAT: Keys = &["startLoc.lat", "start.lat", "start position lat", "start_position_lat"];
    pub const START_LONG: Keys = &["startLoc.lon", "start.lon", "start position long", "start_position_long"];
    pub const END_LAT: Keys = &["endLoc.lat", "end.lat", "end position lat", "end_position_lat"];
    pub const END_LONG: Keys = &["endLoc.lon", "end.lon", "end position long", "end_position_long"];
    pub const METERS: Keys = &["meters", "distance meters", "distance_meters"];
    pub const YARDS: Keys = &["yards", "distance yards", "distance_yards"];
}

pub mod fitness {
    use super::Keys;

    pub const HEART_RATE: Keys = &["heart_rate", "heart rate", "heartRate", "3"];
    pub const TOTAL_DISTANCE: Keys = &["total_distance", "total distance", "totalDistance", "9"];
}

/// Keys recognized by the whole-document par scan.
pub mod scan {
    use super::Keys;

    pub const HOLE: Keys = &["hole", "hole_number", "holeNumber"];
    pub const PAR: Keys = &["par", "hole_par", "holePar"];
}
