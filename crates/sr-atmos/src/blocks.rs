//! Graph adapters for the atmosphere and airspeed models.

use sr_core::{DomainError, Real};
use sr_graph::{Block, Partials};

use crate::airspeed::{AirspeedConverter, AirspeedKind};
use crate::model::{AtmosphereModel, Channel};

/// Atmosphere as a block: `altitude -> temperature, pressure, density,
/// speed_of_sound, viscosity [, abs_humidity] [, drho_dh] [, dsos_dh]`.
///
/// Optional channels are exposed according to the model's configuration.
#[derive(Debug, Clone)]
pub struct AtmosphereBlock {
    model: AtmosphereModel,
    channels: Vec<Channel>,
    outputs: Vec<&'static str>,
}

impl AtmosphereBlock {
    pub fn new(model: AtmosphereModel) -> Self {
        let config = model.config();
        let channels: Vec<Channel> = Channel::ALL
            .into_iter()
            .filter(|c| match c {
                Channel::AbsHumidity => config.output_abs_humidity,
                Channel::DensityGradient => config.output_drho_dh,
                Channel::SpeedOfSoundGradient => config.output_dsos_dh,
                _ => true,
            })
            .collect();
        let outputs = channels.iter().map(|c| c.name()).collect();
        Self {
            model,
            channels,
            outputs,
        }
    }

    pub fn model(&self) -> &AtmosphereModel {
        &self.model
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }
}

impl Block for AtmosphereBlock {
    fn kind(&self) -> &'static str {
        "Atmosphere"
    }

    fn inputs(&self) -> &[&'static str] {
        &["altitude"]
    }

    fn outputs(&self) -> &[&'static str] {
        &self.outputs
    }

    fn compute(&self, inputs: &[&[Real]], outputs: &mut [Vec<Real>]) -> Result<(), DomainError> {
        for (i, &h) in inputs[0].iter().enumerate() {
            let value = self.model.sample(h).value;
            for (out, &c) in outputs.iter_mut().zip(&self.channels) {
                out[i] = value.get(c);
            }
        }
        Ok(())
    }

    fn compute_partials(
        &self,
        inputs: &[&[Real]],
        partials: &mut Partials,
    ) -> Result<(), DomainError> {
        for (i, &h) in inputs[0].iter().enumerate() {
            let d = self.model.sample(h).d_altitude;
            for (o, &c) in self.channels.iter().enumerate() {
                partials.entry_mut(o, 0)[i] = d.get(c);
            }
        }
        Ok(())
    }
}

/// Airspeed conversion as a block:
/// `airspeed, density, speed_of_sound -> true_airspeed`.
#[derive(Debug, Clone, Copy)]
pub struct FlightConditionsBlock {
    converter: AirspeedConverter,
}

impl FlightConditionsBlock {
    pub fn new(kind: AirspeedKind) -> Self {
        Self {
            converter: AirspeedConverter::new(kind),
        }
    }

    pub fn converter(&self) -> &AirspeedConverter {
        &self.converter
    }
}

impl Block for FlightConditionsBlock {
    fn kind(&self) -> &'static str {
        "FlightConditions"
    }

    fn inputs(&self) -> &[&'static str] {
        &["airspeed", "density", "speed_of_sound"]
    }

    fn outputs(&self) -> &[&'static str] {
        &["true_airspeed"]
    }

    fn compute(&self, inputs: &[&[Real]], outputs: &mut [Vec<Real>]) -> Result<(), DomainError> {
        let tas = self.converter.convert(inputs[0], inputs[1], inputs[2])?;
        outputs[0].copy_from_slice(tas.as_slice());
        Ok(())
    }

    fn compute_partials(
        &self,
        inputs: &[&[Real]],
        partials: &mut Partials,
    ) -> Result<(), DomainError> {
        let kind = self.converter.kind();
        for i in 0..partials.len() {
            let s = self
                .converter
                .to_true_airspeed(inputs[0][i], inputs[1][i], inputs[2][i], i)?;
            partials.entry_mut(0, 0)[i] = s.d_airspeed;
            if kind == AirspeedKind::EquivalentAirspeed {
                partials.entry_mut(0, 1)[i] = s.d_density;
            }
            if kind == AirspeedKind::Mach {
                partials.entry_mut(0, 2)[i] = s.d_speed_of_sound;
            }
        }
        Ok(())
    }
}
