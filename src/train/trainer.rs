use crate::{
    engine::traits::Trainable,
    error::{NetError, Result},
};

/// One in-order pass of single-sample training steps over a dataset.
///
/// Returns the mean of the per-sample squared errors, each measured before
/// that sample's update.
pub fn train_network<T: Trainable + ?Sized>(
    network: &mut T,
    inputs: &[Vec<f64>],
    expected_outputs: &[Vec<f64>],
) -> Result<f64> {
    check_dataset(&*network, inputs, expected_outputs)?;

    let mut total_error = 0.0;
    for (input, expected) in inputs.iter().zip(expected_outputs.iter()) {
        total_error += network.train(input, expected)?;
    }

    Ok(total_error / inputs.len() as f64)
}

/// Rejects empty or misaligned datasets before any sample is trained on, so
/// a bad row never leaves the network half-way through a pass.
pub(crate) fn check_dataset<T: Trainable + ?Sized>(
    network: &T,
    inputs: &[Vec<f64>],
    expected_outputs: &[Vec<f64>],
) -> Result<()> {
    if inputs.is_empty() {
        return Err(NetError::EmptyDataset);
    }
    if inputs.len() != expected_outputs.len() {
        return Err(NetError::DatasetMismatch {
            inputs: inputs.len(),
            labels: expected_outputs.len(),
        });
    }
    let n_in = network.number_of_inputs();
    if let Some(bad) = inputs.iter().find(|x| x.len() != n_in) {
        return Err(NetError::InputMismatch { expected: n_in, actual: bad.len() });
    }
    let n_out = network.number_of_outputs();
    if let Some(bad) = expected_outputs.iter().find(|y| y.len() != n_out) {
        return Err(NetError::OutputMismatch { expected: n_out, actual: bad.len() });
    }
    Ok(())
}
