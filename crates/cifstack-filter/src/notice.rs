use std::fmt;

use serde::Serialize;

use cifstack_core::ShapeId;

/// Axis along which a shape's extent is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Axis {
    X,
    Y,
}

/// One failed admission check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    Oversized { axis: Axis, extent: u64, limit: i64 },
    UnknownLayer { layer: Option<String> },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Oversized {
                axis,
                extent,
                limit,
            } => write!(f, "{:?} extent {} exceeds size threshold {}", axis, extent, limit),
            SkipReason::UnknownLayer { layer: Some(name) } => {
                write!(f, "layer '{}' is not in the layer stack", name)
            }
            SkipReason::UnknownLayer { layer: None } => write!(f, "no layer declared"),
        }
    }
}

/// Report for a shape left out of the scene. Every failed check is listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkipNotice {
    pub shape_id: ShapeId,
    pub reasons: Vec<SkipReason>,
}

impl fmt::Display for SkipNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Skipping shape {}:", self.shape_id)?;
        for (i, reason) in self.reasons.iter().enumerate() {
            let sep = if i == 0 { " " } else { "; " };
            write!(f, "{}{}", sep, reason)?;
        }
        Ok(())
    }
}

/// Receiver for skip notices.
pub trait DiagnosticSink {
    fn report(&mut self, notice: SkipNotice);
}

/// Forwards notices to the `log` facade at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, notice: SkipNotice) {
        log::warn!("{}", notice);
    }
}

impl DiagnosticSink for Vec<SkipNotice> {
    fn report(&mut self, notice: SkipNotice) {
        self.push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_message_names_shape_and_checks() {
        let notice = SkipNotice {
            shape_id: 7,
            reasons: vec![
                SkipReason::Oversized {
                    axis: Axis::X,
                    extent: 15001,
                    limit: 15000,
                },
                SkipReason::UnknownLayer { layer: None },
            ],
        };
        assert_eq!(
            notice.to_string(),
            "Skipping shape 7: X extent 15001 exceeds size threshold 15000; no layer declared"
        );
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Vec<SkipNotice> = Vec::new();
        sink.report(SkipNotice {
            shape_id: 1,
            reasons: vec![SkipReason::UnknownLayer {
                layer: Some("POLY".into()),
            }],
        });
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].shape_id, 1);
    }
}
