//! Grouping of a frame stream into contiguous episodes.
use crate::{ConvertError, Frame};
use anyhow::Result;

/// An episode identifier together with its ordered frames.
pub type EpisodeGroup = (i64, Vec<Frame>);

/// Iterator adapter that groups a frame stream by contiguous runs of the
/// episode identifier.
///
/// Grouping is contiguity based, not keyed: each unbroken run of one
/// identifier becomes one group, frames in source order. An identifier that
/// re-appears after a different identifier has interleaved starts a second,
/// independent group; it is never merged with the earlier run. Sources that
/// need stable aggregation across non-contiguous runs must pre-sort.
///
/// The stream is consumed in a single pass. The first error, either a
/// failing source item or a frame without an episode identifier, is yielded
/// once, after which the iterator is fused; any buffered frames are
/// discarded.
pub struct EpisodeSegments<I> {
    frames: I,
    current: Option<EpisodeGroup>,
    done: bool,
}

impl<I> EpisodeSegments<I> {
    /// Wraps a frame source.
    pub fn new(frames: I) -> Self {
        Self {
            frames,
            current: None,
            done: false,
        }
    }
}

impl<I> Iterator for EpisodeSegments<I>
where
    I: Iterator<Item = Result<Frame>>,
{
    type Item = Result<EpisodeGroup>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            match self.frames.next() {
                // End of input: flush the buffered group, if any.
                None => {
                    self.done = true;
                    return self.current.take().map(Ok);
                }
                Some(Err(err)) => {
                    self.done = true;
                    return Some(Err(err));
                }
                Some(Ok(frame)) => {
                    let episode = match frame.episode {
                        Some(episode) => episode,
                        None => {
                            self.done = true;
                            return Some(Err(ConvertError::MissingGroupKey.into()));
                        }
                    };

                    match self.current.as_mut() {
                        None => {
                            self.current = Some((episode, vec![frame]));
                        }
                        Some((current, buffer)) if *current == episode => {
                            buffer.push(frame);
                        }
                        // A new identifier ends the current episode.
                        Some(_) => {
                            let finished = self.current.replace((episode, vec![frame]));
                            return finished.map(Ok);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, ArrayD, IxDyn};

    fn frame(episode: Option<i64>, tag: f32) -> Frame {
        Frame {
            episode,
            image: ArrayD::zeros(IxDyn(&[2, 2, 3])),
            wrist_image: ArrayD::zeros(IxDyn(&[2, 2, 3])),
            state: Array1::from_elem(4, tag),
            actions: Array1::zeros(3),
            task: None,
        }
    }

    fn segments(frames: Vec<Frame>) -> Vec<EpisodeGroup> {
        EpisodeSegments::new(frames.into_iter().map(Ok))
            .map(|group| group.unwrap())
            .collect()
    }

    #[test]
    fn contiguous_runs_become_groups() {
        let groups = segments(vec![
            frame(Some(0), 0.),
            frame(Some(0), 1.),
            frame(Some(1), 2.),
            frame(Some(1), 3.),
            frame(Some(1), 4.),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, 0);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, 1);
        assert_eq!(groups[1].1.len(), 3);
        assert_eq!(
            groups.iter().map(|(_, frames)| frames.len()).sum::<usize>(),
            5
        );

        // Relative frame order within a run is preserved.
        let tags: Vec<f32> = groups[1].1.iter().map(|f| f.state[0]).collect();
        assert_eq!(tags, vec![2., 3., 4.]);
    }

    #[test]
    fn reappearing_identifier_starts_a_new_group() {
        let groups = segments(vec![
            frame(Some(7), 0.),
            frame(Some(3), 1.),
            frame(Some(7), 2.),
        ]);
        let ids: Vec<i64> = groups.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![7, 3, 7]);
    }

    #[test]
    fn single_run_is_flushed_at_end_of_input() {
        let groups = segments(vec![frame(Some(5), 0.), frame(Some(5), 1.)]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, 5);
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn empty_stream_yields_no_groups() {
        assert!(segments(vec![]).is_empty());
    }

    #[test]
    fn missing_identifier_fails_the_run() {
        let mut groups =
            EpisodeSegments::new(vec![frame(Some(0), 0.), frame(None, 1.)].into_iter().map(Ok));

        let err = groups
            .find_map(|group| group.err())
            .expect("grouping must fail");
        assert!(matches!(
            err.downcast_ref::<ConvertError>(),
            Some(ConvertError::MissingGroupKey)
        ));

        // Fused after the failure; the buffered frame is discarded.
        assert!(groups.next().is_none());
    }

    #[test]
    fn source_errors_are_propagated() {
        let items: Vec<Result<Frame>> = vec![
            Ok(frame(Some(0), 0.)),
            Err(anyhow::anyhow!("corrupt frame")),
        ];
        let mut groups = EpisodeSegments::new(items.into_iter());

        assert!(groups.next().unwrap().is_err());
        assert!(groups.next().is_none());
    }
}
