//! Loading 2-D F32 tensors from SafeTensors files

use calibrar_common::{CalibrarError, Result};
use ndarray::Array2;
use safetensors::tensor::{Dtype, TensorView};
use safetensors::SafeTensors;
use std::path::Path;

/// Tensors read from a SafeTensors file, sorted by name
#[derive(Debug, Default)]
pub struct LoadedTensors {
    /// 2-D F32 tensors
    pub tensors: Vec<(String, Array2<f32>)>,
    /// Names of tensors that are not 2-D F32
    pub skipped: Vec<String>,
}

/// Read every 2-D F32 tensor from `path`
pub fn load_tensors(path: &Path) -> Result<LoadedTensors> {
    let data = std::fs::read(path)
        .map_err(|e| CalibrarError::io(format!("reading tensors {}", path.display()), e))?;
    let safetensors = SafeTensors::deserialize(&data).map_err(|e| CalibrarError::Serialization {
        message: format!("failed to parse {}: {e}", path.display()),
    })?;

    let mut names: Vec<String> = safetensors.names().iter().map(|n| n.to_string()).collect();
    names.sort();

    let mut loaded = LoadedTensors::default();
    for name in names {
        let view = safetensors
            .tensor(&name)
            .map_err(|e| CalibrarError::Serialization {
                message: format!("failed to read tensor {name}: {e}"),
            })?;

        match to_matrix(&view)? {
            Some(matrix) => loaded.tensors.push((name, matrix)),
            None => loaded.skipped.push(name),
        }
    }

    Ok(loaded)
}

fn to_matrix(view: &TensorView<'_>) -> Result<Option<Array2<f32>>> {
    let &[rows, cols] = view.shape() else {
        return Ok(None);
    };
    if view.dtype() != Dtype::F32 {
        return Ok(None);
    }

    let values: Vec<f32> = view
        .data()
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    let len = values.len();
    Array2::from_shape_vec((rows, cols), values)
        .map(Some)
        .map_err(|_| CalibrarError::ShapeMismatch {
            expected: vec![rows, cols],
            actual: vec![len],
        })
}
