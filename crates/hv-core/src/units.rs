// hv-core/src/units.rs

use uom::si::f64::{
    AngularVelocity as UomAngularVelocity, ElectricalResistance as UomElectricalResistance,
    Frequency as UomFrequency, Length as UomLength, Mass as UomMass, Power as UomPower,
    Time as UomTime,
};

// Public canonical unit types (SI, f64)
pub type AngularVelocity = UomAngularVelocity;
pub type Resistance = UomElectricalResistance;
pub type Frequency = UomFrequency;
pub type Length = UomLength;
pub type Mass = UomMass;
pub type Power = UomPower;
pub type Time = UomTime;

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn rad_ps(v: f64) -> AngularVelocity {
    use uom::si::angular_velocity::radian_per_second;
    AngularVelocity::new::<radian_per_second>(v)
}

#[inline]
pub fn ohm(v: f64) -> Resistance {
    use uom::si::electrical_resistance::ohm;
    Resistance::new::<ohm>(v)
}

#[inline]
pub fn hz(v: f64) -> Frequency {
    use uom::si::frequency::hertz;
    Frequency::new::<hertz>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn w(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

pub mod constants {
    /// Gravitational acceleration used by the harvester model (m/s²).
    pub const G_MPS2: f64 = 9.81;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _m = kg(0.41);
        let _w = rad_ps(11.99);
        let _r = ohm(0.5);
        let _f = hz(1.9);
        let _l = m(0.01);
        let _dt = s(0.026);
        let _p = w(0.001);
    }

    #[test]
    fn constructors_store_si_values() {
        use uom::si::electrical_resistance::milliohm;
        use uom::si::power::milliwatt;
        assert!((ohm(0.5).get::<milliohm>() - 500.0).abs() < 1e-9);
        assert!((w(0.002).get::<milliwatt>() - 2.0).abs() < 1e-12);
    }
}
