//! Static attribute tables per device family

use super::attribute::AccessMode::{ReadOnly as R, ReadWrite as RW};
use super::attribute::AttributeDef;

const ON_OFF: &[(&str, &str)] = &[("0", "Off"), ("1", "On")];
const NO_YES: &[(&str, &str)] = &[("0", "No"), ("1", "Yes")];
const TEMP_UNIT: &[(&str, &str)] = &[("0", "Celsius"), ("1", "Fahrenheit")];

/// Generic climate bean, also used by the 008-399 window and 006-299 portable units
pub static CLIMATE: &[AttributeDef] = &[
    AttributeDef::enumeration(
        "t_work_mode",
        "Mode",
        "0,1,2,3,4,5",
        &[
            ("0", "Fan"),
            ("1", "Heat"),
            ("2", "Cool"),
            ("3", "Dry"),
            ("4", "Auto"),
            ("5", "E-star"),
        ],
        RW,
    ),
    AttributeDef::enumeration("t_power", "Power", "0,1", ON_OFF, RW),
    AttributeDef::number("t_temp", "Target Temperature", 1, Some("16~32,61~90"), RW),
    AttributeDef::enumeration(
        "t_fan_speed",
        "Fan Speed",
        "0,5,6,7,8,9",
        &[
            ("2", "Low"),
            ("3", "Medium"),
            ("4", "High"),
            ("0", "Auto"),
            ("5", "Low"),
            ("6", "Mid-Low"),
            ("7", "Mid"),
            ("8", "Mid-High"),
            ("9", "High"),
        ],
        RW,
    ),
    AttributeDef::enumeration("t_up_down", "Swing Vertical", "0,1", ON_OFF, RW),
    AttributeDef::enumeration("t_temp_type", "Temperature Unit", "0,1", TEMP_UNIT, RW),
    AttributeDef::enumeration("t_left_right", "Swing Horizontal", "0,1", ON_OFF, RW),
    AttributeDef::number("f_power_consumption", "Power Consumption", 1, None, R),
    AttributeDef::enumeration("t_fan_mute", "Quiet Mode", "0,1", ON_OFF, RW),
    AttributeDef::number("f_temp_in", "Indoor Temperature", 1, None, R),
    AttributeDef::enumeration("t_8heat", "8°C Heat", "0,1", ON_OFF, RW),
    AttributeDef::enumeration("t_eco", "Eco Mode", "0,1", ON_OFF, RW),
    AttributeDef::number("t_humidity", "Target Humidity", 5, Some("30~80"), RW),
    AttributeDef::number("f_humidity", "Indoor Humidity", 1, Some("30~90"), R),
    AttributeDef::enumeration("t_super", "Turbo", "0,1", ON_OFF, RW),
];

/// Split air conditioner 009-199
pub static SPLIT_AC: &[AttributeDef] = &[
    AttributeDef::enumeration(
        "t_work_mode",
        "Mode",
        "0,1,2,3,4",
        &[
            ("0", "Fan"),
            ("1", "Heat"),
            ("2", "Cool"),
            ("3", "Dry"),
            ("4", "Auto"),
        ],
        RW,
    ),
    AttributeDef::enumeration("t_power", "Power", "0,1", ON_OFF, RW),
    AttributeDef::number("t_temp", "Target Temperature", 1, Some("16~32,61~90"), RW),
    AttributeDef::enumeration(
        "t_fan_speed",
        "Fan Speed",
        "0,5,6,7,8,9",
        &[
            ("0", "Auto"),
            ("5", "Ultra Low"),
            ("6", "Low"),
            ("7", "Medium"),
            ("8", "High"),
            ("9", "Ultra High"),
        ],
        RW,
    ),
    AttributeDef::enumeration("t_up_down", "Swing Vertical", "0,1", ON_OFF, RW),
    AttributeDef::enumeration("t_left_right", "Swing Horizontal", "0,1", ON_OFF, RW),
    AttributeDef::number("f_power_consumption", "Power Consumption", 1, None, R),
    AttributeDef::enumeration("t_fan_mute", "Quiet Mode", "0,1", ON_OFF, RW),
    AttributeDef::enumeration("t_super", "Turbo", "0,1", ON_OFF, RW),
    AttributeDef::number("f_temp_in", "Indoor Temperature", 1, None, R),
    AttributeDef::enumeration("t_8heat", "8°C Heat", "0,1", ON_OFF, RW),
];

/// Dehumidifier 007
pub static DEHUMIDIFIER: &[AttributeDef] = &[
    AttributeDef::enumeration("t_power", "Power", "0,1", ON_OFF, RW),
    AttributeDef::enumeration(
        "t_work_mode",
        "Mode",
        "0,1,2,3",
        &[
            ("0", "Manual"),
            ("1", "Continuous"),
            ("2", "Auto"),
            ("3", "Dry Clothes"),
        ],
        RW,
    ),
    AttributeDef::number("t_humidity", "Target Humidity", 5, Some("30~80"), RW),
    AttributeDef::number("f_humidity", "Indoor Humidity", 1, Some("30~90"), R),
    AttributeDef::enumeration(
        "t_fan_speed",
        "Fan Speed",
        "0,1,2,3",
        &[("0", "Auto"), ("1", "High"), ("2", "Medium"), ("3", "Low")],
        RW,
    ),
    AttributeDef::number("f_power_consumption", "Power Consumption", 1, None, R),
    AttributeDef::enumeration("t_child_lock", "Child Lock", "0,1", ON_OFF, RW),
    AttributeDef::enumeration("f_water_full", "Water Tank Full", "0,1", NO_YES, R),
];

/// Heat pump 035-699
pub static HEAT_PUMP: &[AttributeDef] = &[
    AttributeDef::enumeration("t_power", "Power", "0,1", ON_OFF, RW),
    AttributeDef::enumeration(
        "t_work_mode",
        "Mode",
        "0,1,2,3,4,5,6,7,8,9,10,11,12",
        &[
            ("0", "Off"),
            ("1", "Heat"),
            ("2", "Cool"),
            ("3", "Auto"),
            ("4", "Hot Water"),
            ("5", "Heat + Hot Water"),
            ("6", "Cool + Hot Water"),
            ("7", "Auto + Hot Water"),
            ("8", "Standard"),
            ("9", "Eco"),
            ("10", "Dual Hot Water"),
            ("11", "Dual 1"),
            ("12", "Electric Hot Water"),
        ],
        RW,
    ),
    AttributeDef::number("t_temp", "Target Temperature", 1, Some("16~32"), RW),
    AttributeDef::number("f_temp_in", "Indoor Temperature", 1, None, R),
    AttributeDef::number("t_dhw_temp", "DHW Target Temperature", 1, Some("30~60"), RW),
    AttributeDef::number("f_dhw_temp", "DHW Current Temperature", 1, None, R),
    AttributeDef::number(
        "t_zone1water_settemp1",
        "Zone 1 Target Temperature",
        1,
        Some("16~32"),
        RW,
    ),
    AttributeDef::number("f_zone1water_temp1", "Zone 1 Current Temperature", 1, None, R),
    AttributeDef::number(
        "t_zone2water_settemp2",
        "Zone 2 Target Temperature",
        1,
        Some("16~32"),
        RW,
    ),
    AttributeDef::number("f_zone2water_temp2", "Zone 2 Current Temperature", 1, None, R),
    AttributeDef::number("f_in_water_temp", "Inlet Water Temperature", 1, None, R),
    AttributeDef::number("f_out_water_temp", "Outlet Water Temperature", 1, None, R),
    AttributeDef::number("f_power_consumption", "Power Consumption", 1, None, R),
    AttributeDef::enumeration("t_eco", "Eco Mode", "0,1", ON_OFF, RW),
    AttributeDef::enumeration("t_super", "Turbo", "0,1", ON_OFF, RW),
];

/// Oven 013
pub static OVEN: &[AttributeDef] = &[
    AttributeDef::enumeration("Status", "Power", "0,1", ON_OFF, RW),
    AttributeDef::enumeration("Child_lock", "Child Lock", "0,1", ON_OFF, RW),
    AttributeDef::enumeration("Door", "Door Status", "0,1", &[("0", "Closed"), ("1", "Open")], R),
    AttributeDef::enumeration(
        "Door_lock",
        "Door Lock",
        "0,1",
        &[("0", "Unlocked"), ("1", "Locked")],
        RW,
    ),
    AttributeDef::enumeration(
        "Step_1_status",
        "Step 1 Status",
        "0,1,2,3",
        &[
            ("0", "Inactive"),
            ("1", "Active"),
            ("2", "Paused"),
            ("3", "Finished"),
        ],
        RW,
    ),
    AttributeDef::number(
        "Step_1_set_temperature",
        "Step 1 Target Temperature",
        1,
        Some("30~300"),
        RW,
    ),
    AttributeDef::enumeration(
        "Step_1_bake_mode",
        "Step 1 Bake Mode",
        "0,1,2,3,4,5,6,7,8,9,10",
        &[
            ("0", "Conventional"),
            ("1", "Fan"),
            ("2", "Grill"),
            ("3", "Bottom Heat"),
            ("4", "Defrost"),
            ("5", "Steam"),
            ("6", "Microwave"),
            ("7", "Combination"),
            ("8", "Pizza"),
            ("9", "Eco"),
            ("10", "Fast Preheat"),
        ],
        RW,
    ),
    AttributeDef::number("Step_1_set_heater_system", "Step 1 Heater System", 1, None, RW),
    AttributeDef::number("Step_1_duration", "Step 1 Duration (minutes)", 1, Some("0~1440"), RW),
    AttributeDef::number("Step_1_remaining_time", "Step 1 Remaining Time (seconds)", 1, None, R),
    AttributeDef::enumeration(
        "Step_2_status",
        "Step 2 Status",
        "0,1,2,3",
        &[
            ("0", "Inactive"),
            ("1", "Active"),
            ("2", "Paused"),
            ("3", "Finished"),
        ],
        RW,
    ),
    AttributeDef::number(
        "Step_2_set_temperature",
        "Step 2 Target Temperature",
        1,
        Some("30~300"),
        RW,
    ),
    AttributeDef::enumeration(
        "Step_3_status",
        "Step 3 Status",
        "0,1,2,3",
        &[
            ("0", "Inactive"),
            ("1", "Active"),
            ("2", "Paused"),
            ("3", "Finished"),
        ],
        RW,
    ),
    AttributeDef::number(
        "Step_3_set_temperature",
        "Step 3 Target Temperature",
        1,
        Some("30~300"),
        RW,
    ),
    AttributeDef::number("Current_baking_step", "Current Baking Step", 1, None, R),
    AttributeDef::number("Oven_measured_temperature", "Current Oven Temperature", 1, None, R),
    AttributeDef::enumeration("Oven_temperature_unit", "Temperature Unit", "0,1", TEMP_UNIT, RW),
    AttributeDef::enumeration(
        "Sand_timer_1_status",
        "Timer 1 Status",
        "0,1,2,3,4,5,6,7",
        &[
            ("0", "Inactive"),
            ("1", "Running"),
            ("2", "Paused"),
            ("5", "Elapsed"),
            ("7", "Finished"),
        ],
        RW,
    ),
    AttributeDef::number(
        "Sand_timer_1_duration_minutes",
        "Timer 1 Duration (minutes)",
        1,
        Some("0~255"),
        RW,
    ),
    AttributeDef::enumeration(
        "Sand_timer_2_status",
        "Timer 2 Status",
        "0,1,2,3,4,5,6,7",
        &[
            ("0", "Inactive"),
            ("1", "Running"),
            ("2", "Paused"),
            ("5", "Elapsed"),
            ("7", "Finished"),
        ],
        RW,
    ),
    AttributeDef::enumeration(
        "Sand_timer_3_status",
        "Timer 3 Status",
        "0,1,2,3,4,5,6,7",
        &[
            ("0", "Inactive"),
            ("1", "Running"),
            ("2", "Paused"),
            ("5", "Elapsed"),
            ("7", "Finished"),
        ],
        RW,
    ),
    AttributeDef::enumeration(
        "Steam_123",
        "Steam Function",
        "0,1,2,3",
        &[("0", "Off"), ("1", "Low"), ("2", "Medium"), ("3", "High")],
        RW,
    ),
    AttributeDef::enumeration("Steam_shot", "Steam Shot", "0,1", ON_OFF, RW),
    AttributeDef::enumeration(
        "Water_tank",
        "Water Tank Status",
        "0,1,2",
        &[("0", "Empty"), ("1", "Low"), ("2", "Full")],
        R,
    ),
    AttributeDef::enumeration("Interior_light", "Interior Light", "0,1", ON_OFF, RW),
    AttributeDef::number("Brightness", "Display Brightness", 1, Some("0~5"), RW),
    AttributeDef::enumeration(
        "Display_standby",
        "Display Standby",
        "0,1",
        &[("0", "Active"), ("1", "Standby")],
        RW,
    ),
    AttributeDef::enumeration(
        "Meat_probe_status",
        "Meat Probe Status",
        "0,1",
        &[("0", "Not Inserted"), ("1", "Inserted")],
        R,
    ),
    AttributeDef::number(
        "Meat_probe_set_temperature",
        "Meat Probe Target Temperature",
        1,
        Some("30~100"),
        RW,
    ),
    AttributeDef::number(
        "Meat_probe_measured_temperature",
        "Meat Probe Current Temperature",
        1,
        None,
        R,
    ),
    AttributeDef::enumeration("Alarm_baking_finished", "Baking Finished Alarm", "0,1", NO_YES, R),
    AttributeDef::enumeration(
        "Alarm_set_temperature_reached",
        "Target Temperature Reached",
        "0,1",
        NO_YES,
        R,
    ),
    AttributeDef::enumeration("Alarm_door_opened", "Door Opened Alert", "0,1", NO_YES, R),
    AttributeDef::enumeration(
        "Alarm_water_tank_is_empty",
        "Water Tank Empty Alert",
        "0,1",
        NO_YES,
        R,
    ),
    AttributeDef::enumeration(
        "Alarm_fast_preheating_finished",
        "Fast Preheat Finished",
        "0,1",
        NO_YES,
        R,
    ),
    AttributeDef::enumeration(
        "Grill_plate_status",
        "Grill Plate Status",
        "0,1,2",
        &[("0", "Off"), ("1", "Heating"), ("2", "Ready")],
        R,
    ),
    AttributeDef::number("Grill_plate_measured_temperature", "Grill Plate Temperature", 1, None, R),
    AttributeDef::enumeration("Night_mode_status", "Night Mode", "0,1", ON_OFF, RW),
    AttributeDef::enumeration("Gratin_status", "Gratin Function", "0,1", ON_OFF, RW),
    AttributeDef::number("Volume", "Sound Volume", 1, Some("0~5"), RW),
    AttributeDef::enumeration(
        "Remote_control_monitoring",
        "Remote Control Enabled",
        "0,1",
        ON_OFF,
        RW,
    ),
];

/// Air-to-water heat pump 044
pub static AIR_TO_WATER: &[AttributeDef] = &[
    AttributeDef::enumeration(
        "mode",
        "Operating Mode",
        "0,1,2,3",
        &[("0", "Off"), ("1", "Heating"), ("2", "Cooling"), ("3", "Auto")],
        RW,
    ),
    AttributeDef::enumeration(
        "realRunMode",
        "Current Run Mode",
        "0,1,2,3,4,5",
        &[
            ("0", "Standby"),
            ("1", "Heating"),
            ("2", "Cooling"),
            ("3", "DHW"),
            ("4", "Defrost"),
            ("5", "Emergency"),
        ],
        R,
    ),
    AttributeDef::enumeration("c1_SW_ON", "Zone 1 Power", "0,1", ON_OFF, RW),
    AttributeDef::number("c1R1T", "Zone 1 Room Temperature", 1, None, R),
    AttributeDef::number("c1R2T", "Zone 1 Room Temperature 2", 1, None, R),
    AttributeDef::number("c1R3T", "Zone 1 Room Temperature 3", 1, None, R),
    AttributeDef::number("c1R4T", "Zone 1 Room Temperature 4", 1, None, R),
    AttributeDef::number("Trc1R1", "Zone 1 Target Temperature", 1, Some("16~30"), RW),
    AttributeDef::number("Trc1R2", "Zone 1 Target Temperature 2", 1, Some("16~30"), RW),
    AttributeDef::number("Trc1R3", "Zone 1 Target Temperature 3", 1, Some("16~30"), RW),
    AttributeDef::number("Trc1R4", "Zone 1 Target Temperature 4", 1, Some("16~30"), RW),
    AttributeDef::enumeration("c1R1_SW", "Zone 1 Room 1 Active", "0,1", ON_OFF, RW),
    AttributeDef::enumeration("c1R2_SW", "Zone 1 Room 2 Active", "0,1", ON_OFF, RW),
    AttributeDef::number("c1ws", "Zone 1 Water Supply Temperature", 1, None, R),
    AttributeDef::enumeration("c2_SW_ON", "Zone 2 Power", "0,1", ON_OFF, RW),
    AttributeDef::number("c2R1T", "Zone 2 Room Temperature", 1, None, R),
    AttributeDef::number("c2R2T", "Zone 2 Room Temperature 2", 1, None, R),
    AttributeDef::number("c2R3T", "Zone 2 Room Temperature 3", 1, None, R),
    AttributeDef::number("c2R4T", "Zone 2 Room Temperature 4", 1, None, R),
    AttributeDef::number("Trc2R1", "Zone 2 Target Temperature", 1, Some("16~30"), RW),
    AttributeDef::number("c2ws", "Zone 2 Water Supply Temperature", 1, None, R),
    AttributeDef::enumeration("DHW_SW_ON", "DHW Power", "0,1", ON_OFF, RW),
    AttributeDef::enumeration(
        "DHWs",
        "DHW Status",
        "0,1,2",
        &[("0", "Off"), ("1", "Heating"), ("2", "Ready")],
        R,
    ),
    AttributeDef::number("TDHW", "DHW Target Temperature", 1, Some("30~60"), RW),
    AttributeDef::number("TDHWS", "DHW Current Temperature", 1, None, R),
    AttributeDef::number("Ttos", "DHW Tank Temperature", 1, None, R),
    AttributeDef::enumeration("Defrost_DHW_s", "DHW Defrost Status", "0,1", NO_YES, R),
    AttributeDef::enumeration("DHW_Boost_s", "DHW Boost Active", "0,1", NO_YES, R),
    AttributeDef::enumeration("SWP_SW_ON", "Pool Heating Power", "0,1", ON_OFF, RW),
    AttributeDef::enumeration("SWPs", "Pool Status", "0,1", &[("0", "Off"), ("1", "Heating")], R),
    AttributeDef::number("Tswp", "Pool Current Temperature", 1, None, R),
    AttributeDef::number("Tswps", "Pool Target Temperature", 1, Some("20~35"), RW),
    AttributeDef::number("Capacity_SWP", "Pool Heating Capacity", 1, None, R),
    AttributeDef::enumeration("A2W_SW_ON", "A2W System Power", "0,1", ON_OFF, RW),
    AttributeDef::number("Ta_2", "Outdoor Temperature", 1, None, R),
    AttributeDef::number("Ta_24", "Outdoor Temperature 24h Avg", 1, None, R),
    AttributeDef::number("Ta_ao", "Outdoor Air Temperature", 1, None, R),
    AttributeDef::number("Trl", "Return Line Temperature", 1, None, R),
    AttributeDef::number("Trg", "Supply Line Temperature", 1, None, R),
    AttributeDef::number("Twi", "Water Inlet Temperature", 1, None, R),
    AttributeDef::number("Two", "Water Outlet Temperature", 1, None, R),
    AttributeDef::number("Two2", "Water Outlet Temperature 2", 1, None, R),
    AttributeDef::number("Ts_c1_water", "Zone 1 Water Sensor Temperature", 1, None, R),
    AttributeDef::number("Ts_c2_water", "Zone 2 Water Sensor Temperature", 1, None, R),
    AttributeDef::number("Pw", "Current Power Consumption (W)", 1, None, R),
    AttributeDef::number("Capacity_heating", "Heating Capacity", 1, None, R),
    AttributeDef::number("Capacity_cooling", "Cooling Capacity", 1, None, R),
    AttributeDef::number("Capacity_DHW", "DHW Heating Capacity", 1, None, R),
    AttributeDef::number("EH1_Power", "Electric Heater 1 Power (kW)", 1, None, R),
    AttributeDef::number("EH2_Power", "Electric Heater 2 Power (kW)", 1, None, R),
    AttributeDef::enumeration("isSilentMode", "Silent Mode", "0,1", ON_OFF, RW),
    AttributeDef::enumeration("isECO", "Eco Mode", "0,1", ON_OFF, RW),
    AttributeDef::enumeration("isNightMode", "Night Mode", "0,1", ON_OFF, R),
    AttributeDef::enumeration("isFastHotWater", "Fast Hot Water", "0,1", ON_OFF, RW),
    AttributeDef::enumeration("isDisinfect", "Disinfection Mode", "0,1", ON_OFF, RW),
    AttributeDef::enumeration("1_Antifrozen_WP1_s", "Anti-Frost Level 1", "0,1", NO_YES, R),
    AttributeDef::enumeration("2_Antifrozen_WP1_s", "Anti-Frost Level 2", "0,1", NO_YES, R),
    AttributeDef::enumeration("Antifrozen_EH1_s", "Electric Heater Anti-Frost", "0,1", NO_YES, R),
    AttributeDef::enumeration("Antifrozen_HP_s", "Heat Pump Anti-Frost", "0,1", NO_YES, R),
    AttributeDef::enumeration("Defrost_Spaceheat_s", "Space Heating Defrost", "0,1", NO_YES, R),
    AttributeDef::enumeration("Anti_Legionella_s", "Anti-Legionella Protection", "0,1", NO_YES, R),
    AttributeDef::number("alarmCode", "System Alarm Code", 1, None, R),
    AttributeDef::enumeration(
        "oilReturn",
        "Oil Return Status",
        "0,1",
        &[("0", "Normal"), ("1", "Returning")],
        R,
    ),
    AttributeDef::enumeration("isJumpMediumWind", "Medium Wind Active", "0,1", NO_YES, R),
    AttributeDef::enumeration("isJumpHighWind", "High Wind Active", "0,1", NO_YES, R),
    AttributeDef::enumeration("isRefrigerationJump", "Refrigeration Jump Active", "0,1", NO_YES, R),
    AttributeDef::enumeration("Hob_status", "Hob Status", "0,1", ON_OFF, RW),
    AttributeDef::number("Hob_zone_1_status", "Hob Zone 1 Status", 1, None, R),
    AttributeDef::number("Hob_zone_2_status", "Hob Zone 2 Status", 1, None, R),
    AttributeDef::number("Hob_zone_3_status", "Hob Zone 3 Status", 1, None, R),
    AttributeDef::number("Hob_zone_4_status", "Hob Zone 4 Status", 1, None, R),
    AttributeDef::number("Hob_zone_5_status", "Hob Zone 5 Status", 1, None, R),
    AttributeDef::enumeration(
        "HOB_warming_zone_status",
        "Hob Warming Zone Status",
        "0,1",
        ON_OFF,
        R,
    ),
    AttributeDef::number(
        "HOB_warming_zone_power_level",
        "Hob Warming Zone Power Level",
        1,
        Some("0~9"),
        RW,
    ),
    AttributeDef::number("Tsolar", "Solar Collector Temperature", 1, None, R),
];

pub static HUB: &[AttributeDef] = &[
    AttributeDef::enumeration(
        "online_status",
        "Online Status",
        "0,1",
        &[("0", "Offline"), ("1", "Online")],
        R,
    ),
    AttributeDef::number("bindTime", "Binding Time", 1, None, R),
    AttributeDef::number("useTime", "Last Usage Time", 1, None, R),
    AttributeDef::number("createTime", "Device Creation Time", 1, None, R),
    AttributeDef::number("roomId", "Room ID", 1, None, RW),
    AttributeDef::string("roomName", "Room Name", RW),
    AttributeDef::string("deviceFeatureCode", "Feature Code", R),
    AttributeDef::string("deviceFeatureName", "Feature Name", R),
    AttributeDef::enumeration(
        "energyRole",
        "Energy Monitoring Role",
        "0,1,2",
        &[("0", "None"), ("1", "Monitor"), ("2", "Controller")],
        R,
    ),
    AttributeDef::enumeration(
        "isShow",
        "Visible in App",
        "0,1",
        &[("0", "Hidden"), ("1", "Visible")],
        RW,
    ),
    AttributeDef::enumeration(
        "role",
        "User Role",
        "0,1,2",
        &[("0", "Owner"), ("1", "Admin"), ("2", "Guest")],
        R,
    ),
];
