use burn::{
    backend::{Autodiff, NdArray},
    prelude::*,
    tensor::Distribution,
};
use vae_encoder_burn::{
    reparameterize, Encoder, EncoderConfig, EncoderError, NoiseSource, SeededNoise,
};

type TestBackend = NdArray<f32>;
type TestAutodiffBackend = Autodiff<NdArray<f32>>;

fn build(image_size: usize, channels: usize, latent_dim: usize) -> Encoder<TestBackend> {
    EncoderConfig::new(image_size, channels, latent_dim)
        .init(&Default::default())
        .expect("valid encoder configuration")
}

fn images(dims: [usize; 4]) -> Tensor<TestBackend, 4> {
    Tensor::random(dims, Distribution::Normal(0.0, 1.0), &Default::default())
}

fn max_abs_diff(a: Tensor<TestBackend, 2>, b: Tensor<TestBackend, 2>) -> f32 {
    (a - b).abs().max().into_scalar()
}

#[test]
fn eight_pixel_rgb_scenario() {
    let encoder = EncoderConfig::new(8, 3, 16)
        .with_layers_per_size(2)
        .init::<TestBackend>(&Default::default())
        .unwrap();

    assert_eq!(encoder.stage_count(), 3);
    assert_eq!(encoder.final_channels(), 24);

    let [z, mu, logvar] = encoder.forward(images([4, 3, 8, 8]));
    assert_eq!(z.dims(), [4, 16]);
    assert_eq!(mu.dims(), [4, 16]);
    assert_eq!(logvar.dims(), [4, 16]);
}

#[test]
fn stage_count_is_log2_of_image_size() {
    for (image_size, stages) in [(1, 0), (2, 1), (4, 2), (8, 3), (16, 4), (32, 5)] {
        let encoder = build(image_size, 1, 2);
        assert_eq!(encoder.stage_count(), stages, "image_size = {image_size}");
        assert_eq!(encoder.final_channels(), image_size);
    }
}

#[test]
fn non_power_of_two_sizes_fail_construction() {
    for image_size in [0, 3, 5, 6, 10] {
        let result = EncoderConfig::new(image_size, 3, 16).init::<TestBackend>(&Default::default());
        assert!(
            matches!(result, Err(EncoderError::InvalidImageSize { .. })),
            "image_size = {image_size}"
        );
    }
}

#[test]
fn output_shapes_follow_batch_size() {
    let encoder = build(4, 2, 7);

    for batch in [1, 2, 5] {
        let [z, mu, logvar] = encoder.forward(images([batch, 2, 4, 4]));
        assert_eq!(z.dims(), [batch, 7]);
        assert_eq!(mu.dims(), [batch, 7]);
        assert_eq!(logvar.dims(), [batch, 7]);
    }
}

#[test]
fn distribution_parameters_are_deterministic() {
    let encoder = build(4, 3, 8);
    let input = images([3, 3, 4, 4]);

    let [z1, mu1, logvar1] = encoder.forward(input.clone());
    let [z2, mu2, logvar2] = encoder.forward(input);

    assert_eq!(max_abs_diff(mu1, mu2), 0.0);
    assert_eq!(max_abs_diff(logvar1, logvar2), 0.0);
    assert!(max_abs_diff(z1, z2) > 0.0);
}

#[test]
fn seeded_sampling_is_reproducible() {
    let encoder = build(4, 3, 8);
    let input = images([2, 3, 4, 4]);

    let [z1, _, _] = encoder.forward_with_noise(input.clone(), &mut SeededNoise::new(42));
    let [z2, _, _] = encoder.forward_with_noise(input.clone(), &mut SeededNoise::new(42));
    let [z3, _, _] = encoder.forward_with_noise(input, &mut SeededNoise::new(43));

    assert_eq!(max_abs_diff(z1.clone(), z2), 0.0);
    assert!(max_abs_diff(z1, z3) > 0.0);
}

#[test]
fn standardized_latents_are_standard_normal() {
    let encoder = build(2, 1, 8);
    let input = images([250, 1, 2, 2]);

    let [z, mu, logvar] = encoder.forward_with_noise(input, &mut SeededNoise::new(2024));
    let eps = (z - mu) / logvar.mul_scalar(0.5).exp();

    let mean = eps.clone().mean().into_scalar();
    let values = eps.into_data().to_vec::<f32>().unwrap();
    let n = values.len() as f32;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / n;

    assert!(mean.abs() < 0.1, "mean = {mean}");
    assert!((var - 1.0).abs() < 0.1, "var = {var}");
}

#[test]
fn zero_logvar_adds_noise_to_mean() {
    let device = Default::default();
    let mu = Tensor::<TestBackend, 2>::from_floats([[0.5, -1.0, 2.0], [3.0, 0.0, -4.0]], &device);
    let logvar = Tensor::<TestBackend, 2>::zeros([2, 3], &device);

    let z = reparameterize(mu.clone(), logvar, &mut SeededNoise::new(8));
    let eps: Tensor<TestBackend, 2> = SeededNoise::new(8).standard_normal(Shape::new([2, 3]), &device);

    assert!(max_abs_diff(z, eps + mu) < 1e-6);
}

#[test]
fn gradients_flow_back_to_the_image() {
    let device = Default::default();
    let encoder = EncoderConfig::new(4, 1, 3)
        .init::<TestAutodiffBackend>(&device)
        .unwrap();
    let input = Tensor::<TestAutodiffBackend, 4>::random(
        [2, 1, 4, 4],
        Distribution::Normal(0.0, 1.0),
        &device,
    )
    .require_grad();

    let [z, _, _] = encoder.forward_with_noise(input.clone(), &mut SeededNoise::new(1));
    let grads = z.sum().backward();

    let grad = input.grad(&grads).expect("input should receive a gradient");
    assert_eq!(grad.dims(), [2, 1, 4, 4]);
}
