#[cfg(test)]
mod tests {
    use birnn::cells::{CfCCell, CfcMode, LSTMCell, StepUnit};
    use birnn::rnn::{Bidirectional, StepProcessor};
    use burn::backend::NdArray;
    use burn::tensor::Tensor;

    type Backend = NdArray<f32>;

    fn create_test_cell(mode: CfcMode) -> CfCCell<Backend> {
        let device = Default::default();
        CfCCell::new(20, 50, &device).with_mode(mode)
    }

    #[test]
    fn test_cfc_state_change() {
        let device = Default::default();
        let cell = create_test_cell(CfcMode::Default);

        let input = Tensor::<Backend, 2>::ones([2, 20], &device);
        let hx = cell.init_state(2, &device);

        let (new_hidden, output) = cell.step(hx.clone(), input);

        // State should have changed
        let diff = (new_hidden.clone() - hx).abs().mean().into_scalar();
        assert!(diff > 0.0);

        // Output should equal new_hidden for CfC
        let output_diff = (output - new_hidden).abs().mean().into_scalar();
        assert!(output_diff < 1e-6, "Output should equal new_hidden");
    }

    #[test]
    fn test_cfc_batch_processing() {
        let device = Default::default();
        let cell = create_test_cell(CfcMode::Pure);

        for batch in [1, 8, 32] {
            let input = Tensor::<Backend, 2>::zeros([batch, 20], &device);
            let hx = Tensor::<Backend, 2>::zeros([batch, 50], &device);

            let (output, _) = cell.forward(input, hx, 1.0);
            assert_eq!(output.dims(), [batch, 50]);
        }
    }

    #[test]
    fn test_fresh_clone_has_independent_parameters() {
        let device = Default::default();
        let cell = create_test_cell(CfcMode::Default);
        let twin = cell.fresh_clone();

        let input = Tensor::<Backend, 2>::random(
            [2, 20],
            burn::tensor::Distribution::Uniform(-1.0, 1.0),
            &device,
        );
        let hx = Tensor::<Backend, 2>::zeros([2, 50], &device);

        let (out1, _) = cell.forward(input.clone(), hx.clone(), 1.0);
        let (out2, _) = twin.forward(input, hx, 1.0);

        let diff = (out1 - out2).abs().mean().into_scalar();
        assert!(diff > 1e-4, "Fresh clone should not share parameters");
    }

    #[test]
    fn test_lstm_processor_threads_state() {
        let device = Default::default();
        let mut processor = StepProcessor::new(LSTMCell::<Backend>::new(4, 6, &device)).unwrap();

        let sequence = vec![Tensor::<Backend, 2>::ones([3, 4], &device); 5];
        let outputs = processor.process(sequence);

        assert_eq!(outputs.len(), 5);
        let (h, c) = processor.state().cloned().unwrap();
        assert_eq!(h.dims(), [3, 6]);
        assert_eq!(c.dims(), [3, 6]);

        let diff = (h - outputs[4].clone()).abs().sum().into_scalar();
        assert!(diff < 1e-6, "Final output should be the final hidden state");
    }

    #[test]
    fn test_bidirectional_over_each_cell_mode() {
        let device = Default::default();

        for mode in [CfcMode::Default, CfcMode::Pure, CfcMode::NoGate] {
            let cell = CfCCell::<Backend>::new(8, 12, &device).with_mode(mode);
            let mut layer = Bidirectional::new(cell).unwrap();

            assert_eq!(layer.backward_processor().unit().mode(), mode);

            let input = Tensor::<Backend, 3>::random(
                [2, 6, 8],
                burn::tensor::Distribution::Uniform(-1.0, 1.0),
                &device,
            );
            let output = layer.forward(input).unwrap();
            assert_eq!(output.dims(), [2, 6, 24]);
        }
    }

    #[test]
    fn test_bidirectional_lstm_with_explicit_backward() {
        let device = Default::default();
        let mut layer = Bidirectional::from_parts(
            LSTMCell::<Backend>::new(8, 10, &device),
            Some(LSTMCell::<Backend>::new(8, 6, &device)),
            birnn::rnn::Concat::default(),
        )
        .unwrap();

        assert_eq!(layer.output_size(), 16);

        let input = Tensor::<Backend, 3>::zeros([3, 4, 8], &device);
        assert_eq!(layer.forward(input).unwrap().dims(), [3, 4, 16]);
    }
}
