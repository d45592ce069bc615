//! LeRobot dataset loading through the Python `lerobot` package.
use crate::{ConvertError, Frame, TaskLabel};
use anyhow::{anyhow, Result};
use ndarray::{Array1, ArrayD, Ix1};
use num_traits::cast::AsPrimitive;
use numpy::{Element, PyArrayDyn};
use pyo3::{types::PyBytes, PyAny, PyObject, Python, ToPyObject};

/// Handle to a LeRobot dataset on disk.
///
/// Wraps `lerobot.common.datasets.lerobot_dataset.LeRobotDataset`. The GIL
/// is entered per call; nothing is cached on the Rust side beyond the
/// dataset handle itself.
pub struct LeRobotDataset {
    dataset: PyObject,
}

impl LeRobotDataset {
    /// Opens the dataset rooted at `input_dir`.
    ///
    /// Fails with [`ConvertError::LeRobotUnavailable`] when the `lerobot`
    /// package cannot be imported.
    pub fn load(input_dir: impl AsRef<str>) -> Result<Self> {
        Python::with_gil(|py| {
            let module = py
                .import("lerobot.common.datasets.lerobot_dataset")
                .map_err(ConvertError::LeRobotUnavailable)?;
            let dataset = module
                .getattr("LeRobotDataset")?
                .call1((input_dir.as_ref(),))?
                .to_object(py);
            Ok(Self { dataset })
        })
    }

    /// Number of frames in the dataset.
    pub fn num_frames(&self) -> Result<usize> {
        Python::with_gil(|py| Ok(self.dataset.call_method0(py, "__len__")?.extract(py)?))
    }

    /// One-pass iteration over the frames in storage order.
    pub fn frames(&self) -> Result<LeRobotFrames> {
        Ok(LeRobotFrames {
            dataset: Python::with_gil(|py| self.dataset.clone_ref(py)),
            len: self.num_frames()?,
            next: 0,
        })
    }
}

/// Iterator over the frames of a [`LeRobotDataset`].
pub struct LeRobotFrames {
    dataset: PyObject,
    len: usize,
    next: usize,
}

impl Iterator for LeRobotFrames {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.len {
            return None;
        }
        let at = self.next;
        self.next += 1;

        Some(Python::with_gil(|py| {
            let frame = self.dataset.call_method1(py, "__getitem__", (at,))?;
            extract_frame(frame.as_ref(py))
        }))
    }
}

fn extract_frame(frame: &PyAny) -> Result<Frame> {
    Ok(Frame {
        episode: episode_id(frame)?,
        image: image_array(frame, "image")?,
        wrist_image: image_array(frame, "wrist_image")?,
        state: vector(frame, "state")?,
        actions: vector(frame, "actions")?,
        task: task_label(frame)?,
    })
}

/// Looks the identifier up under `episode_index`, then `episode_id`.
fn episode_id(frame: &PyAny) -> Result<Option<i64>> {
    for key in &["episode_index", "episode_id"] {
        let value = frame.call_method1("get", (*key,))?;
        if value.is_none() {
            continue;
        }
        let id = match value.extract::<i64>() {
            Ok(id) => id,
            // Scalar tensors expose their value through `item`.
            Err(_) => value.call_method0("item")?.extract::<i64>()?,
        };
        return Ok(Some(id));
    }
    Ok(None)
}

fn required(frame: &PyAny, key: &str) -> Result<&PyAny> {
    let value = frame.call_method1("get", (key,))?;
    if value.is_none() {
        Err(anyhow!("frame is missing required key `{}`", key))
    } else {
        Ok(value)
    }
}

/// Extracts an array value, converting element types on the way.
///
/// Torch tensors are converted through their `numpy` method when direct
/// extraction fails.
fn array_as<T1, T2>(value: &PyAny) -> Result<ArrayD<T2>>
where
    T1: Element + AsPrimitive<T2>,
    T2: Copy + 'static,
{
    let array: &PyArrayDyn<T1> = match value.extract() {
        Ok(array) => array,
        Err(_) => value.call_method0("numpy")?.extract()?,
    };
    Ok(array.to_owned_array().mapv(|elem| elem.as_()))
}

/// Image arrays are taken as stored, `u8` elements and no axis reordering.
fn image_array(frame: &PyAny, key: &str) -> Result<ArrayD<u8>> {
    let value = required(frame, key)?;
    array_as::<u8, u8>(value).map_err(|_| anyhow!("expected `{}` to be a uint8 image array", key))
}

fn vector(frame: &PyAny, key: &str) -> Result<Array1<f32>> {
    let value = required(frame, key)?;
    let array = match array_as::<f32, f32>(value) {
        Ok(array) => array,
        // Some exports store proprioception in double precision.
        Err(_) => array_as::<f64, f32>(value)?,
    };
    array
        .into_dimensionality::<Ix1>()
        .map_err(|_| anyhow!("expected `{}` to be a 1-D vector", key))
}

fn task_label(frame: &PyAny) -> Result<Option<TaskLabel>> {
    let value = frame.call_method1("get", ("task",))?;
    if value.is_none() {
        return Ok(None);
    }
    if let Ok(bytes) = value.cast_as::<PyBytes>() {
        return Ok(Some(TaskLabel::Bytes(bytes.as_bytes().to_vec())));
    }
    Ok(Some(TaskLabel::Text(value.str()?.to_str()?.to_owned())))
}
