//! Bidirectional Integration Tests
//!
//! Alignment, state-policy, and merge behaviour of the bidirectional layer,
//! checked with running-sum units whose outputs reveal exactly which inputs
//! each direction has seen.

use birnn::cells::{CfCCell, StepUnit};
use birnn::rnn::{Bidirectional, Combiner, Concat, Mode, StepProcessor, Sum};
use birnn::BiRnnError;
use burn::backend::NdArray;
use burn::tensor::backend::Backend as BurnBackend;
use burn::tensor::Tensor;

type Backend = NdArray<f32>;
type Device = <Backend as BurnBackend>::Device;

/// Identity passthrough with a one-slot running-sum state, scaled on output
#[derive(Debug, Clone)]
struct RunningSum {
    scale: f32,
}

impl RunningSum {
    fn new() -> Self {
        Self { scale: 1.0 }
    }
}

impl StepUnit<Backend> for RunningSum {
    type State = Tensor<Backend, 2>;

    fn input_size(&self) -> usize {
        1
    }

    fn output_size(&self) -> usize {
        1
    }

    fn init_state(&self, batch_size: usize, device: &Device) -> Self::State {
        Tensor::zeros([batch_size, 1], device)
    }

    fn step(&self, state: Self::State, input: Tensor<Backend, 2>) -> (Self::State, Tensor<Backend, 2>) {
        let sum = state + input;
        (sum.clone(), sum * self.scale)
    }

    fn fresh_clone(&self) -> Self {
        Self { scale: self.scale }
    }
}

/// Unit that claims a zero-width output
#[derive(Debug)]
struct Hollow;

impl StepUnit<Backend> for Hollow {
    type State = ();

    fn input_size(&self) -> usize {
        1
    }

    fn output_size(&self) -> usize {
        0
    }

    fn init_state(&self, _batch_size: usize, _device: &Device) -> Self::State {}

    fn step(&self, state: Self::State, input: Tensor<Backend, 2>) -> (Self::State, Tensor<Backend, 2>) {
        (state, input)
    }

    fn fresh_clone(&self) -> Self {
        Hollow
    }
}

/// Forward minus backward
#[derive(Debug)]
struct Difference;

impl Combiner<Backend> for Difference {
    fn combine(&self, forward: Tensor<Backend, 2>, backward: Tensor<Backend, 2>) -> Tensor<Backend, 2> {
        forward - backward
    }

    fn merged_shape(&self, forward: [usize; 2], backward: [usize; 2]) -> birnn::Result<[usize; 2]> {
        if forward != backward {
            return Err(BiRnnError::InvalidUnit("shapes differ".to_string()));
        }
        Ok(forward)
    }
}

fn scalars(values: &[f32]) -> Vec<Tensor<Backend, 2>> {
    let device = Default::default();
    values
        .iter()
        .map(|&v| Tensor::<Backend, 2>::full([1, 1], v, &device))
        .collect()
}

fn rows(outputs: Vec<Tensor<Backend, 2>>) -> Vec<Vec<f32>> {
    outputs
        .into_iter()
        .map(|t| t.into_data().to_vec::<f32>().unwrap())
        .collect()
}

fn summing_layer() -> Bidirectional<Backend, RunningSum> {
    Bidirectional::new(RunningSum::new()).unwrap()
}

#[test]
fn test_running_sum_example() {
    let mut layer = summing_layer();

    let merged = rows(layer.process(scalars(&[1.0, 2.0, 3.0])).unwrap());

    assert_eq!(merged, vec![vec![1.0, 6.0], vec![3.0, 5.0], vec![6.0, 3.0]]);
}

#[test]
fn test_alignment() {
    let mut layer = summing_layer();
    let inputs = [1.0, 10.0, 100.0, 1000.0];

    let merged = rows(layer.process(scalars(&inputs)).unwrap());

    for (t, row) in merged.iter().enumerate() {
        let seen_forward: f32 = inputs[..=t].iter().sum();
        let seen_backward: f32 = inputs[t..].iter().sum();
        assert_eq!(row, &vec![seen_forward, seen_backward], "step {t}");
    }
}

#[test]
fn test_length_preservation() {
    let device = Default::default();
    let mut layer = Bidirectional::new(CfCCell::<Backend>::new(3, 5, &device)).unwrap();

    for seq_len in [0usize, 1, 2, 7] {
        let sequence: Vec<Tensor<Backend, 2>> = (0..seq_len)
            .map(|_| Tensor::<Backend, 2>::ones([2, 3], &device))
            .collect();
        let outputs = layer.process(sequence).unwrap();

        assert_eq!(outputs.len(), seq_len);
        for output in outputs {
            assert_eq!(output.dims(), [2, 10]);
        }
    }
}

#[test]
fn test_default_calls_are_independent() {
    let mut layer = summing_layer();
    let mut fresh = summing_layer();

    layer.process(scalars(&[5.0, 6.0])).unwrap();
    let after = rows(layer.process(scalars(&[1.0, 2.0])).unwrap());
    let clean = rows(fresh.process(scalars(&[1.0, 2.0])).unwrap());

    assert_eq!(after, clean);
}

#[test]
fn test_processor_remember_matches_concatenated_run() {
    let mut chunked = StepProcessor::new(RunningSum::new()).unwrap();
    chunked.remember(true);
    chunked.process(scalars(&[1.0, 2.0, 3.0]));
    let tail = rows(chunked.process(scalars(&[4.0, 5.0])));

    let mut whole = StepProcessor::new(RunningSum::new()).unwrap();
    let all = rows(whole.process(scalars(&[1.0, 2.0, 3.0, 4.0, 5.0])));

    assert_eq!(tail, all[3..].to_vec());
}

#[test]
fn test_processor_remember_with_cfc_cell() {
    let device: Device = Default::default();
    let cell = CfCCell::<Backend>::new(2, 4, &device);
    let twin = cell.clone();
    let sequence: Vec<Tensor<Backend, 2>> = (0..6)
        .map(|t| Tensor::<Backend, 2>::full([1, 2], t as f32 * 0.25 - 0.5, &device))
        .collect();

    let mut chunked = StepProcessor::new(cell).unwrap();
    chunked.remember(true);
    chunked.process(sequence[..4].to_vec());
    let tail = rows(chunked.process(sequence[4..].to_vec()));

    let mut whole = StepProcessor::new(twin).unwrap();
    let all = rows(whole.process(sequence));

    for (got, expected) in tail.iter().zip(&all[4..]) {
        for (g, e) in got.iter().zip(expected) {
            assert!((g - e).abs() < 1e-5);
        }
    }
}

#[test]
fn test_remember_forward_half_matches_concatenated_run() {
    let mut chunked = summing_layer();
    chunked.remember(true);
    chunked.process(scalars(&[1.0, 2.0])).unwrap();
    let tail = rows(chunked.process(scalars(&[3.0, 4.0])).unwrap());

    let mut whole = summing_layer();
    let all = rows(whole.process(scalars(&[1.0, 2.0, 3.0, 4.0])).unwrap());

    assert_eq!(tail[0][0], all[2][0]);
    assert_eq!(tail[1][0], all[3][0]);
    // Backward state carried over from the first chunk: 3 (= 1 + 2) plus its own suffix sums
    assert_eq!(tail[0][1], 3.0 + 7.0);
    assert_eq!(tail[1][1], 3.0 + 4.0);
}

#[test]
fn test_train_mode_overrides_remember() {
    let mut layer = summing_layer();
    layer.remember(true);
    layer.train();
    assert_eq!(layer.mode(), Mode::Train);

    layer.process(scalars(&[100.0])).unwrap();
    let merged = rows(layer.process(scalars(&[1.0, 2.0])).unwrap());

    assert_eq!(merged, vec![vec![1.0, 3.0], vec![3.0, 2.0]]);
}

#[test]
fn test_forget_resets() {
    let mut layer = summing_layer();
    layer.remember(true);
    layer.process(scalars(&[7.0, 8.0, 9.0])).unwrap();
    layer.forget();

    let after = rows(layer.process(scalars(&[1.0, 2.0])).unwrap());
    let clean = rows(summing_layer().process(scalars(&[1.0, 2.0])).unwrap());

    assert_eq!(after, clean);
}

#[test]
fn test_state_isolation() {
    // Same backward unit, very different forward units
    let mut plain = Bidirectional::from_parts(
        RunningSum::new(),
        Some(RunningSum::new()),
        Concat::default(),
    )
    .unwrap();
    let mut loud = Bidirectional::from_parts(
        RunningSum { scale: 100.0 },
        Some(RunningSum::new()),
        Concat::default(),
    )
    .unwrap();
    plain.remember(true);
    loud.remember(true);

    for chunk in [&[1.0, 2.0][..], &[3.0][..], &[4.0, 5.0, 6.0][..]] {
        let a = rows(plain.process(scalars(chunk)).unwrap());
        let b = rows(loud.process(scalars(chunk)).unwrap());

        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x[1], y[1]);
            assert_eq!(x[0] * 100.0, y[0]);
        }
    }
}

#[test]
fn test_backward_unit_defaults_to_fresh_clone() {
    let layer = Bidirectional::new(RunningSum { scale: 2.0 }).unwrap();

    assert_eq!(layer.backward_processor().unit().scale, 2.0);
    assert!(layer.backward_processor().state().is_none());
}

#[test]
fn test_sum_and_custom_merge() {
    let mut summed = Bidirectional::from_parts(RunningSum::new(), None, Sum).unwrap();
    let merged = rows(summed.process(scalars(&[1.0, 2.0, 3.0])).unwrap());
    assert_eq!(merged, vec![vec![7.0], vec![8.0], vec![9.0]]);

    let mut diffed = Bidirectional::from_parts(RunningSum::new(), None, Difference).unwrap();
    let merged = rows(diffed.process(scalars(&[1.0, 2.0, 3.0])).unwrap());
    assert_eq!(merged, vec![vec![-5.0], vec![-2.0], vec![3.0]]);
}

#[test]
fn test_batch_axis_concat() {
    let mut layer = Bidirectional::from_parts(RunningSum::new(), None, Concat::from(0)).unwrap();
    let outputs = layer.process(scalars(&[1.0, 2.0])).unwrap();

    assert_eq!(outputs[0].dims(), [2, 1]);
    assert_eq!(rows(outputs), vec![vec![1.0, 3.0], vec![3.0, 2.0]]);
}

#[test]
fn test_invalid_units_rejected() {
    let result = Bidirectional::new(Hollow);
    assert!(matches!(result, Err(BiRnnError::InvalidUnit(_))));

    let result = Bidirectional::from_parts(RunningSum::new(), None, Concat::along(2));
    assert!(matches!(result, Err(BiRnnError::InvalidUnit(_))));
}

#[test]
fn test_tensor_forward_matches_process() {
    let device: Device = Default::default();
    let mut layer = summing_layer();

    // [batch=1, seq=3, features=1]
    let input = Tensor::<Backend, 3>::from_floats([[[1.0], [2.0], [3.0]]], &device);
    let output = layer.forward(input).unwrap();

    assert_eq!(output.dims(), [1, 3, 2]);
    let values = output.into_data().to_vec::<f32>().unwrap();
    assert_eq!(values, vec![1.0, 6.0, 3.0, 5.0, 6.0, 3.0]);
}
