use super::unit::StepUnit;
use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Standard LSTM cell
///
/// Implements the standard LSTM equations:
/// - i = tanh(W_ii @ x + b_ii + W_hi @ h)
/// - g = sigmoid(W_ig @ x + b_ig + W_hg @ h)
/// - f = sigmoid(W_if @ x + b_if + W_hf @ h + 1)
/// - o = sigmoid(W_io @ x + b_io + W_ho @ h)
/// - c' = f * c + i * g
/// - h' = o * tanh(c')
///
/// As a [`StepUnit`] the state is `(h, c)` and the per-step output is `h'`.
#[derive(Module, Debug)]
pub struct LSTMCell<B: Backend> {
    input_size: usize,
    hidden_size: usize,
    input_map: Linear<B>,     // input -> 4 * hidden_size (with bias)
    recurrent_map: Linear<B>, // hidden -> 4 * hidden_size (no bias)
}

impl<B: Backend> LSTMCell<B> {
    /// Create a new LSTM cell
    ///
    /// # Arguments
    /// * `input_size` - Size of the input features
    /// * `hidden_size` - Size of the hidden state
    /// * `device` - Device to create the module on
    pub fn new(input_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        let input_map = LinearConfig::new(input_size, 4 * hidden_size)
            .with_bias(true)
            .init(device);

        let recurrent_map = LinearConfig::new(hidden_size, 4 * hidden_size)
            .with_bias(false)
            .init(device);

        Self {
            input_size,
            hidden_size,
            input_map,
            recurrent_map,
        }
    }

    /// Get the input size
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Get the hidden size
    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Perform a forward pass through the LSTM cell
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape `[batch_size, input_size]`
    /// * `states` - Tuple of (hidden_state, cell_state), each `[batch_size, hidden_size]`
    ///
    /// # Returns
    /// Tuple of (new_hidden_state, new_cell_state)
    pub fn forward(
        &self,
        input: Tensor<B, 2>,
        states: (Tensor<B, 2>, Tensor<B, 2>),
    ) -> (Tensor<B, 2>, Tensor<B, 2>) {
        let (hidden_state, cell_state) = states;

        let z = self.input_map.forward(input) + self.recurrent_map.forward(hidden_state);

        let gates = z.chunk(4, 1);
        let input_activation = gates[0].clone().tanh();
        let input_gate = activation::sigmoid(gates[1].clone());
        let forget_gate = activation::sigmoid(gates[2].clone() + 1.0);
        let output_gate = activation::sigmoid(gates[3].clone());

        let new_cell = cell_state * forget_gate + input_activation * input_gate;
        let new_hidden = new_cell.clone().tanh() * output_gate;

        (new_hidden, new_cell)
    }
}

impl<B: Backend> StepUnit<B> for LSTMCell<B> {
    type State = (Tensor<B, 2>, Tensor<B, 2>);

    fn input_size(&self) -> usize {
        self.input_size
    }

    fn output_size(&self) -> usize {
        self.hidden_size
    }

    fn init_state(&self, batch_size: usize, device: &B::Device) -> Self::State {
        (
            Tensor::zeros([batch_size, self.hidden_size], device),
            Tensor::zeros([batch_size, self.hidden_size], device),
        )
    }

    fn step(&self, state: Self::State, input: Tensor<B, 2>) -> (Self::State, Tensor<B, 2>) {
        let (h, c) = self.forward(input, state);
        ((h.clone(), c), h)
    }

    fn fresh_clone(&self) -> Self {
        let device = self.input_map.weight.device();
        Self::new(self.input_size, self.hidden_size, &device)
    }
}
